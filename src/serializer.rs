use chrono::format::{Item, StrftimeItems};

use crate::config::StreamConfig;
use crate::error::{EncodeError, Result};
use crate::resolver::SerializerResolver;
use crate::sink::Sink;
use crate::value::{PrimitiveArray, Shape, Value};

/// Wire tag names from the XML-RPC value encoding.
pub const INT_TAG: &str = "i4";
pub const BOOLEAN_TAG: &str = "boolean";
pub const DOUBLE_TAG: &str = "double";
pub const DATE_TAG: &str = "dateTime.iso8601";
pub const BASE64_TAG: &str = "base64";

/// Per-write state handed to every serializer: the current stream
/// configuration plus the resolver used for recursive element dispatch.
pub struct WriteContext<'a> {
    pub config: &'a StreamConfig,
    pub resolver: &'a SerializerResolver,
}

/// Strategy for writing one shape of [`Value`] to a [`Sink`].
///
/// A serializer handed a value of any other shape fails loudly rather
/// than mis-serializing it.
pub trait TypeSerializer: Send + Sync {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()>;
}

fn shape_mismatch(expected: Shape, found: &Value) -> EncodeError {
    EncodeError::ShapeMismatch {
        expected: expected.as_str(),
        found: found.shape().as_str(),
    }
}

/// Writes the null marker as an empty string token.
pub struct NullSerializer;

impl TypeSerializer for NullSerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Null => sink.scalar(None, ""),
            other => Err(shape_mismatch(Shape::Null, other)),
        }
    }
}

/// Writes text as untagged character data.
pub struct StringSerializer;

impl TypeSerializer for StringSerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::String(text) => sink.scalar(None, text),
            other => Err(shape_mismatch(Shape::String, other)),
        }
    }
}

pub struct IntSerializer;

impl TypeSerializer for IntSerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Int(n) => sink.scalar(Some(INT_TAG), &n.to_string()),
            other => Err(shape_mismatch(Shape::Int, other)),
        }
    }
}

pub struct BoolSerializer;

impl TypeSerializer for BoolSerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Bool(b) => sink.scalar(Some(BOOLEAN_TAG), if *b { "1" } else { "0" }),
            other => Err(shape_mismatch(Shape::Bool, other)),
        }
    }
}

pub struct DoubleSerializer;

impl TypeSerializer for DoubleSerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Double(d) => sink.scalar(Some(DOUBLE_TAG), &d.to_string()),
            other => Err(shape_mismatch(Shape::Double, other)),
        }
    }
}

/// Writes instants as `dateTime.iso8601` scalars.
///
/// The strftime items are parsed once at construction; the zone offset is
/// resolved from the stream configuration on every write, since it may
/// change between calls.
pub struct DateTimeSerializer {
    items: Vec<Item<'static>>,
}

impl DateTimeSerializer {
    const FORMAT: &'static str = "%Y%m%dT%H:%M:%S";

    pub(crate) fn new() -> Self {
        Self {
            items: StrftimeItems::new(Self::FORMAT).collect(),
        }
    }
}

impl TypeSerializer for DateTimeSerializer {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::DateTime(instant) => {
                let local = instant.with_timezone(&ctx.config.time_zone());
                let text = local.format_with_items(self.items.iter()).to_string();
                sink.scalar(Some(DATE_TAG), &text)
            }
            other => Err(shape_mismatch(Shape::DateTime, other)),
        }
    }
}

/// Routes byte buffers to the base64 wire form. Byte buffers never take
/// the generic array path.
pub struct ByteArraySerializer;

impl TypeSerializer for ByteArraySerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Bytes(data) => sink.scalar_bytes(BASE64_TAG, data),
            other => Err(shape_mismatch(Shape::Bytes, other)),
        }
    }
}

/// Writes a character buffer as character data, like an untagged string.
pub struct CharArraySerializer;

impl TypeSerializer for CharArraySerializer {
    fn write(&self, _ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Chars(chars) => {
                let text: String = chars.iter().collect();
                sink.scalar(None, &text)
            }
            other => Err(shape_mismatch(Shape::Chars, other)),
        }
    }
}

/// Container serializer for heterogeneous arrays. Element serialization
/// re-enters the resolver, so nesting recurses to any depth.
pub struct ObjectArraySerializer;

impl ObjectArraySerializer {
    fn write_elements(ctx: &WriteContext<'_>, sink: &mut dyn Sink, items: &[Value]) -> Result<()> {
        sink.begin_array()?;
        for item in items {
            ctx.resolver.resolve(item).write(ctx, sink, item)?;
        }
        sink.end_array()
    }
}

impl TypeSerializer for ObjectArraySerializer {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Array(items) => Self::write_elements(ctx, sink, items),
            other => Err(shape_mismatch(Shape::Array, other)),
        }
    }
}

/// Ordered sequences share the array container wire form.
pub struct ListSerializer;

impl TypeSerializer for ListSerializer {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::List(items) => ObjectArraySerializer::write_elements(ctx, sink, items),
            other => Err(shape_mismatch(Shape::List, other)),
        }
    }
}

/// Writes mappings as structs, members in insertion order.
pub struct StructSerializer;

impl TypeSerializer for StructSerializer {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Struct(members) => {
                sink.begin_struct()?;
                for (name, member) in members.iter() {
                    sink.begin_member(name)?;
                    ctx.resolver.resolve(member).write(ctx, sink, member)?;
                    sink.end_member()?;
                }
                sink.end_struct()
            }
            other => Err(shape_mismatch(Shape::Struct, other)),
        }
    }
}

/// Boxes an unboxed primitive array by element kind, then delegates to the
/// object-array path, so both produce identical wire output.
pub struct PrimitiveArraySerializer;

impl PrimitiveArraySerializer {
    fn boxed(primitives: &PrimitiveArray) -> Vec<Value> {
        match primitives {
            PrimitiveArray::Short(items) => {
                items.iter().map(|v| Value::Int(i32::from(*v))).collect()
            }
            PrimitiveArray::Int(items) => items.iter().copied().map(Value::Int).collect(),
            // i4 cannot carry 64-bit values; long elements take the
            // textual form.
            PrimitiveArray::Long(items) => {
                items.iter().map(|v| Value::String(v.to_string())).collect()
            }
            PrimitiveArray::Float(items) => {
                items.iter().map(|v| Value::Double(f64::from(*v))).collect()
            }
            PrimitiveArray::Double(items) => items.iter().copied().map(Value::Double).collect(),
            PrimitiveArray::Bool(items) => items.iter().copied().map(Value::Bool).collect(),
        }
    }
}

impl TypeSerializer for PrimitiveArraySerializer {
    fn write(&self, ctx: &WriteContext<'_>, sink: &mut dyn Sink, value: &Value) -> Result<()> {
        match value {
            Value::Primitives(primitives) => {
                let boxed = Value::Array(Self::boxed(primitives));
                ObjectArraySerializer.write(ctx, sink, &boxed)
            }
            other => Err(EncodeError::UnsupportedArrayKind(other.shape().as_str())),
        }
    }
}
