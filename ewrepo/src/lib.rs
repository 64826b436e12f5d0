//! ewrepo - Repository suffix grammar for versioned package repositories
//!
//! This library composes and decomposes the location strings ("suffixes")
//! that identify artifacts inside a package repository, relative to the
//! repository root:
//!
//! ```text
//! /<ErtsVersion>/<Area>[/<Side>]/<PackageName>/<PackageVersion>/<PackageName>.tar.gz
//! ```
//!
//! The [`suffix`] module holds the grammar engine and [`config`] the
//! user-facing configuration file. The engine itself is pure: it never
//! touches the filesystem or the network.

pub mod config;
pub mod suffix;
