use std::io::Write;

use base64::Engine;

use crate::error::Result;

/// Streaming destination serializers write into.
///
/// The surface is deliberately small: tagged or untagged scalar text,
/// tagged raw bytes, and container start/end markers with nested writes in
/// between. Anything built on top of the value encoding (envelopes,
/// transport) lives outside this crate.
pub trait Sink {
    /// Emit a scalar with textual content, wrapped in the given tag when
    /// one is present.
    fn scalar(&mut self, tag: Option<&str>, text: &str) -> Result<()>;

    /// Emit a scalar with raw byte content. The sink owns the base64
    /// rendering.
    fn scalar_bytes(&mut self, tag: &str, data: &[u8]) -> Result<()>;

    fn begin_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;

    fn begin_struct(&mut self) -> Result<()>;
    fn begin_member(&mut self, name: &str) -> Result<()>;
    fn end_member(&mut self) -> Result<()>;
    fn end_struct(&mut self) -> Result<()>;
}

/// [`Sink`] implementation emitting XML-RPC value markup to any writer.
pub struct XmlSink<W: Write> {
    out: W,
}

impl<W: Write> XmlSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn escaped(&mut self, text: &str) -> Result<()> {
        let mut rest = text;
        while let Some(pos) = rest.find(|c| matches!(c, '&' | '<' | '>')) {
            self.out.write_all(rest[..pos].as_bytes())?;
            match rest.as_bytes()[pos] {
                b'&' => self.out.write_all(b"&amp;")?,
                b'<' => self.out.write_all(b"&lt;")?,
                _ => self.out.write_all(b"&gt;")?,
            }
            rest = &rest[pos + 1..];
        }
        self.out.write_all(rest.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> Sink for XmlSink<W> {
    fn scalar(&mut self, tag: Option<&str>, text: &str) -> Result<()> {
        self.out.write_all(b"<value>")?;
        if let Some(tag) = tag {
            write!(self.out, "<{tag}>")?;
        }
        self.escaped(text)?;
        if let Some(tag) = tag {
            write!(self.out, "</{tag}>")?;
        }
        self.out.write_all(b"</value>")?;
        Ok(())
    }

    fn scalar_bytes(&mut self, tag: &str, data: &[u8]) -> Result<()> {
        self.out.write_all(b"<value>")?;
        write!(self.out, "<{tag}>")?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        self.out.write_all(encoded.as_bytes())?;
        write!(self.out, "</{tag}>")?;
        self.out.write_all(b"</value>")?;
        Ok(())
    }

    fn begin_array(&mut self) -> Result<()> {
        self.out.write_all(b"<value><array><data>")?;
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.out.write_all(b"</data></array></value>")?;
        Ok(())
    }

    fn begin_struct(&mut self) -> Result<()> {
        self.out.write_all(b"<value><struct>")?;
        Ok(())
    }

    fn begin_member(&mut self, name: &str) -> Result<()> {
        self.out.write_all(b"<member><name>")?;
        self.escaped(name)?;
        self.out.write_all(b"</name>")?;
        Ok(())
    }

    fn end_member(&mut self) -> Result<()> {
        self.out.write_all(b"</member>")?;
        Ok(())
    }

    fn end_struct(&mut self) -> Result<()> {
        self.out.write_all(b"</struct></value>")?;
        Ok(())
    }
}
