//! HTTP clients for the external collaborators: the video-platform
//! search API and the title metadata API.
//!
//! Clients are thin: they authenticate, page, and map responses into
//! engine input types. Retry and rate-limit policy belongs to callers.

pub mod tmdb;
pub mod youtube;
