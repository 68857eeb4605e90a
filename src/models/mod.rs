pub mod user;
pub mod lookup;
pub mod journey;
pub mod post;
pub mod contact;

pub use user::*;
pub use lookup::*;
pub use journey::*;
pub use post::*;
pub use contact::*;
