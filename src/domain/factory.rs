//! Domain factories for creating domain entities and value objects.

use super::{error::ValueObjectError, value_object::ConnectionId};

/// Factory for generating ConnectionId instances.
///
/// Encapsulates id generation so uniqueness concerns stay out of the
/// validation logic in ConnectionId itself.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId from a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for
    /// consistency with the domain error handling pattern.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        ConnectionId::from_uuid(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate() {
        // when:
        let result = ConnectionIdFactory::generate();

        // then: a standard 36-character UUID string
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str().len(), 36);
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // when:
        let id1 = ConnectionIdFactory::generate().unwrap();
        let id2 = ConnectionIdFactory::generate().unwrap();

        // then:
        assert_ne!(id1, id2);
    }
}
