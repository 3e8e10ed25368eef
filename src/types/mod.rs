pub mod align;
pub mod error;
pub mod ty;

pub use align::{Alignment, align, align_types, aligned_type};
pub use error::{AlignmentError, TypeError};
pub use ty::{CompositeType, ENTITY, SITUATION, TRUTH, Type};
