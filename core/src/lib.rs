//! Helm Core - Navigation Engine Layer
//!
//! A rule graph of [`Segue`]s describes which transitions between sections
//! are legal; a [`Helm`] resolves, against the current path, which single
//! segue a `present`/`dismiss`/`forward` request fires.
//!
//! Navigation failures are expected runtime conditions, not faults: every
//! mutator catches them internally and appends them to an ordered error log
//! the embedding layer observes after each call.

pub mod error;
pub mod helm;
pub mod path;
pub mod segue;

pub use error::HelmError;
pub use helm::Helm;
pub use path::NavPath;
pub use segue::{NavGraph, Segue, Tag};

pub mod prelude {
    pub use crate::error::HelmError;
    pub use crate::helm::Helm;
    pub use crate::path::NavPath;
    pub use crate::segue::{NavGraph, Segue, Tag};
    pub use helm_graph::{DirectedEdge, DirectedGraph, Edge, GraphError, Node};
}
