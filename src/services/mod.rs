pub mod conversation;
pub mod latest;
pub mod normalizer;
pub mod retrieval;
pub mod scope;

pub use conversation::{ConversationQueryEngine, ConversationPage};
pub use latest::{latest, truncate_preview};
pub use normalizer::normalize;
pub use retrieval::{MessageRetrievalEngine, Retrieval};
pub use scope::Scope;
