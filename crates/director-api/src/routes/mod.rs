//! # Route Modules
//!
//! Each module returns a [`RouteGroup`](crate::router::RouteGroup) with its
//! own authentication policy. Groups are mounted in [`crate::app`].

pub mod health;
pub mod info;
pub mod users;
