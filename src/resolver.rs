use log::trace;
use once_cell::sync::OnceCell;

use crate::config::StreamConfig;
use crate::error::Result;
use crate::serializer::{
    BoolSerializer, ByteArraySerializer, CharArraySerializer, DateTimeSerializer,
    DoubleSerializer, IntSerializer, ListSerializer, NullSerializer, ObjectArraySerializer,
    PrimitiveArraySerializer, StringSerializer, StructSerializer, TypeSerializer, WriteContext,
};
use crate::sink::Sink;
use crate::value::Value;

static NULL_SERIALIZER: NullSerializer = NullSerializer;
static STRING_SERIALIZER: StringSerializer = StringSerializer;
static INT_SERIALIZER: IntSerializer = IntSerializer;
static BOOL_SERIALIZER: BoolSerializer = BoolSerializer;
static DOUBLE_SERIALIZER: DoubleSerializer = DoubleSerializer;
static BYTE_ARRAY_SERIALIZER: ByteArraySerializer = ByteArraySerializer;
static CHAR_ARRAY_SERIALIZER: CharArraySerializer = CharArraySerializer;
static OBJECT_ARRAY_SERIALIZER: ObjectArraySerializer = ObjectArraySerializer;
static LIST_SERIALIZER: ListSerializer = ListSerializer;
static STRUCT_SERIALIZER: StructSerializer = StructSerializer;

/// Maps a value's shape to the serializer that encodes it.
///
/// One resolver is created per controlling context and reused across many
/// dispatch calls, including every element of every container. The date
/// and primitive-array serializers are built on first use and cached for
/// the resolver's lifetime; the cells publish atomically, so sharing a
/// resolver across worker threads is safe.
pub struct SerializerResolver {
    date_serializer: OnceCell<DateTimeSerializer>,
    primitive_array_serializer: OnceCell<PrimitiveArraySerializer>,
}

impl SerializerResolver {
    pub fn new() -> Self {
        Self {
            date_serializer: OnceCell::new(),
            primitive_array_serializer: OnceCell::new(),
        }
    }

    /// Select the serializer for `value`. Total over the shape taxonomy:
    /// every shape has exactly one serializer, so resolution cannot fail.
    pub fn resolve(&self, value: &Value) -> &dyn TypeSerializer {
        match value {
            Value::Null => &NULL_SERIALIZER,
            Value::String(_) => &STRING_SERIALIZER,
            Value::Int(_) => &INT_SERIALIZER,
            Value::Bool(_) => &BOOL_SERIALIZER,
            Value::Double(_) => &DOUBLE_SERIALIZER,
            Value::DateTime(_) => self.date_serializer.get_or_init(DateTimeSerializer::new),
            Value::Bytes(_) => &BYTE_ARRAY_SERIALIZER,
            Value::Array(_) => &OBJECT_ARRAY_SERIALIZER,
            Value::List(_) => &LIST_SERIALIZER,
            Value::Struct(_) => &STRUCT_SERIALIZER,
            Value::Chars(_) => &CHAR_ARRAY_SERIALIZER,
            Value::Primitives(_) => self
                .primitive_array_serializer
                .get_or_init(|| PrimitiveArraySerializer),
        }
    }

    /// Resolve `value` and write it to `sink` under `config`.
    ///
    /// This is the entry point the enclosing stream writer calls for each
    /// top-level value; container serializers re-enter [`resolve`] for
    /// their elements.
    ///
    /// [`resolve`]: SerializerResolver::resolve
    pub fn write_value(
        &self,
        config: &StreamConfig,
        sink: &mut dyn Sink,
        value: &Value,
    ) -> Result<()> {
        trace!("encoding {} value", value.shape());
        let ctx = WriteContext {
            config,
            resolver: self,
        };
        self.resolve(value).write(&ctx, sink, value)
    }
}

impl Default for SerializerResolver {
    fn default() -> Self {
        Self::new()
    }
}
