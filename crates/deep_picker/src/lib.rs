pub mod context;
pub use context::*;

pub mod filter;
pub use filter::*;

pub mod finder;
pub use finder::*;

pub mod found;
pub use found::*;

pub mod hierarchy;
pub use hierarchy::*;

pub mod item;
pub use item::*;

pub mod loader;
pub use loader::*;

pub mod picking;
pub use picking::*;

pub mod pool;
pub use pool::*;

pub mod scene;
pub use scene::*;

pub mod session;
pub use session::*;

pub mod settings;
pub use settings::*;
