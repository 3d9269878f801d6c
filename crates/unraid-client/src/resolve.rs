//! Name-or-id resolution for addressable entities.
//!
//! Containers and VMs can be addressed by full id, by display name, or by a
//! unique-enough id prefix. Resolution runs in three tiers, each tier scanning
//! the whole collection before the next one is tried:
//!
//! 1. exact id match
//! 2. exact match on the canonical display name (a leading `/` on the name is
//!    stripped before comparison)
//! 3. id prefix match
//!
//! Within a tier the first entity in collection order wins, so an exact id
//! match is never shadowed by another entity's name or prefix.

use thiserror::Error;

/// Error returned when a token resolves to no entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No entity matched the token in any tier.
    #[error("{kind} not found: {token}")]
    NotFound {
        /// Entity kind for the message, e.g. `"container"`.
        kind: &'static str,
        /// The token that failed to resolve.
        token: String,
    },
}

/// An entity that can be looked up by id or display name.
pub trait Addressable {
    /// Entity kind used in not-found messages.
    const KIND: &'static str;

    /// Stable identifier.
    fn id(&self) -> &str;

    /// Canonical display name, if the entity has one.
    fn canonical_name(&self) -> Option<&str>;
}

/// Resolve `token` against `entities`, returning the matching entity's id.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] when no tier produces a match.
pub fn resolve<'a, T: Addressable>(
    entities: &'a [T],
    token: &str,
) -> Result<&'a str, ResolveError> {
    if let Some(entity) = entities.iter().find(|e| e.id() == token) {
        return Ok(entity.id());
    }

    if let Some(entity) = entities.iter().find(|e| {
        e.canonical_name()
            .is_some_and(|name| name.strip_prefix('/').unwrap_or(name) == token)
    }) {
        return Ok(entity.id());
    }

    if let Some(entity) = entities.iter().find(|e| e.id().starts_with(token)) {
        return Ok(entity.id());
    }

    Err(ResolveError::NotFound {
        kind: T::KIND,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entity {
        id: String,
        name: Option<String>,
    }

    impl Entity {
        fn new(id: &str, name: Option<&str>) -> Self {
            Self {
                id: id.into(),
                name: name.map(Into::into),
            }
        }
    }

    impl Addressable for Entity {
        const KIND: &'static str = "entity";

        fn id(&self) -> &str {
            &self.id
        }

        fn canonical_name(&self) -> Option<&str> {
            self.name.as_deref()
        }
    }

    #[test]
    fn test_exact_id_wins_over_prefix() {
        // "abc" is a prefix of the second entity's id, but an exact id match
        // on the first entity takes precedence.
        let entities = vec![
            Entity::new("abc123", Some("/foo")),
            Entity::new("abc999", Some("/abcdef")),
        ];
        // Exact id beats everything.
        assert_eq!(resolve(&entities, "abc123").unwrap(), "abc123");
    }

    #[test]
    fn test_name_match_strips_leading_slash() {
        let entities = vec![
            Entity::new("abc123", Some("/foo")),
            Entity::new("abc999", Some("/abcdef")),
        ];
        assert_eq!(resolve(&entities, "foo").unwrap(), "abc123");
        assert_eq!(resolve(&entities, "abcdef").unwrap(), "abc999");
    }

    #[test]
    fn test_name_beats_prefix() {
        // "abcdef" is both the second entity's name and a prefix of nothing;
        // "abc" prefixes both ids but matches no name, so the prefix tier
        // picks the first entity in collection order.
        let entities = vec![
            Entity::new("abc123", Some("/foo")),
            Entity::new("abc999", Some("/abcdef")),
        ];
        assert_eq!(resolve(&entities, "abc").unwrap(), "abc123");
    }

    #[test]
    fn test_name_tier_runs_before_prefix_tier() {
        // The token is another entity's id prefix AND this entity's name.
        let entities = vec![
            Entity::new("zzz111", Some("abc")),
            Entity::new("abc999", Some("/other")),
        ];
        assert_eq!(resolve(&entities, "abc").unwrap(), "zzz111");
    }

    #[test]
    fn test_entity_without_name() {
        let entities = vec![Entity::new("abc123", None)];
        assert_eq!(resolve(&entities, "abc").unwrap(), "abc123");
        assert!(resolve(&entities, "foo").is_err());
    }

    #[test]
    fn test_not_found() {
        let entities = vec![Entity::new("abc123", Some("/foo"))];
        let err = resolve(&entities, "zzz").unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotFound {
                kind: "entity",
                token: "zzz".into()
            }
        );
        assert_eq!(err.to_string(), "entity not found: zzz");
    }

    #[test]
    fn test_empty_collection() {
        let entities: Vec<Entity> = vec![];
        assert!(resolve(&entities, "anything").is_err());
    }
}
