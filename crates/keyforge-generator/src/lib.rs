//! Identifier minting for entity factories.
//!
//! Wraps a [`Snowflake`] generator behind the decimal-string interface that
//! record-creating code consumes, and carries the configuration and logging
//! setup of a hosting process.

pub mod config;
pub mod error;
pub mod id_generator;
pub mod telemetry;

pub use config::GeneratorConfig;
pub use error::ConfigError;
pub use id_generator::IdGenerator;

use keyforge_snowflake::{Clock, Error, Snowflake, SnowflakeId};

/// Trait for generating primary keys.
///
/// Implementations are pure generators that don't interact with storage, so
/// entity factories can depend on the trait and swap in a fake under test.
pub trait Generator: Send + Sync + 'static {
    type Output;
    /// Generates a value that is unique across every generator sharing this
    /// generator's epoch but holding a different identity.
    fn generate(&self) -> Result<Self::Output, Error>;
}

impl<C: Clock + 'static> Generator for Snowflake<C> {
    type Output = SnowflakeId;

    fn generate(&self) -> Result<Self::Output, Error> {
        self.next_id()
    }
}

impl<C: Clock + 'static> Generator for IdGenerator<C> {
    type Output = String;

    fn generate(&self) -> Result<Self::Output, Error> {
        self.generate_id()
    }
}

#[cfg(test)]
mod tests {
    use super::Generator;
    use keyforge_snowflake::{Snowflake, SnowflakeSettings};

    fn mint_pair<G: Generator>(generator: &G) -> (G::Output, G::Output) {
        (generator.generate().unwrap(), generator.generate().unwrap())
    }

    #[test]
    fn snowflake_implements_generator_trait() {
        let settings = SnowflakeSettings::builder()
            .datacenter_id(0)
            .worker_id(0)
            .build();

        let snowflake = Snowflake::new(settings).unwrap();

        let (first, second) = mint_pair(&snowflake);
        assert!(second > first);
    }

    #[test]
    fn id_generator_implements_generator_trait() {
        let generator = super::IdGenerator::new(1, 2, None).unwrap();

        let (first, second) = mint_pair(&generator);
        assert_ne!(first, second);
        assert!(second.parse::<u64>().unwrap() > first.parse::<u64>().unwrap());
    }
}
