//! Response Envelope
//!
//! Every successful HTTP response body is wrapped as `{ "data": ... }`.

use serde::Serialize;

/// Success envelope
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    #[inline]
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body for endpoints that only confirm an action
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl Envelope<MessageBody> {
    pub fn message(message: &'static str) -> Self {
        Self::new(MessageBody { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wraps_data() {
        let json = serde_json::to_value(Envelope::new(vec![1, 2, 3])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2, 3] }));
    }

    #[test]
    fn test_message_envelope() {
        let json = serde_json::to_value(Envelope::message("done")).unwrap();
        assert_eq!(json["data"]["message"], "done");
    }
}
