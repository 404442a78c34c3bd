//! Race engine — the entrant card, the weighted draw, and the resolver.

pub mod card;
pub mod draw;
pub mod resolver;

pub use card::RaceCard;
pub use draw::CumulativeWeights;
pub use resolver::Resolver;
