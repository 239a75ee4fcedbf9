//! Foundational types for step extraction from 1D height profiles.
//!
//! ## Profiles
//! A [`Profile`] is a non-empty sequence of `(position, value)` samples with
//! strictly increasing positions. Positions and values are in millimeters.
//! Profiles are immutable values: every operation returns a new profile.
//!
//! ## Errors
//! All fallible operations return [`Error`]. Index accessors and `crop` report
//! [`Error::IndexOutOfRange`]; malformed input reports
//! [`Error::InvalidArgument`].

mod error;
mod geom;
mod profile;

pub use error::{Error, Result};
pub use geom::Point2;
pub use profile::Profile;
