use bytes::Bytes;

/// An uploaded audio clip, captured once at the request boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    data: Bytes,
    content_type: String,
}

impl AudioPayload {
    pub fn new(data: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
