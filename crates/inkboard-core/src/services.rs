//! Contracts of the external recognition and answer collaborators.
//!
//! Both collaborators receive a PNG of a page region and answer asynchronously. The
//! canvas only builds the requests and applies successful results; awaiting the
//! futures and surfacing failures is left to the host.

use crate::document::ItemId;
use crate::geometry::Bounds;
use crate::hit_test::RegionExport;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Failures reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("Service unavailable")]
    Unavailable,
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Reasons a request cannot be formed from the current canvas state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("The current page has no strokes to recognize")]
    EmptyPage,
    #[error("There is no selection to answer about")]
    NoSelection,
}

/// Result type for collaborator calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boxed future for collaborator calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Handwriting recognition: image of a region in, text out.
pub trait RecognitionService {
    fn recognize(&self, image: Vec<u8>, region: Bounds) -> BoxFuture<'_, ServiceResult<String>>;
}

/// Preferred length of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnswerLength {
    Brief,
    #[default]
    Standard,
    Detailed,
}

impl AnswerLength {
    pub fn name(&self) -> &'static str {
        match self {
            AnswerLength::Brief => "brief",
            AnswerLength::Standard => "standard",
            AnswerLength::Detailed => "detailed",
        }
    }
}

/// Answers a question written inside a selected region.
pub trait AnswerService {
    fn answer(
        &self,
        image: Vec<u8>,
        region: Bounds,
        length: AnswerLength,
    ) -> BoxFuture<'_, ServiceResult<String>>;
}

/// Everything needed to recognize a page and later apply the result.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionRequest {
    /// Page the strokes were captured from.
    pub page_index: usize,
    /// Tight bounds of the captured strokes in world coordinates.
    pub content_bounds: Bounds,
    /// Strokes removed when the result is applied.
    pub stroke_ids: Vec<ItemId>,
    /// The region to rasterize.
    pub region: RegionExport,
}

/// A selected region and the requested answer length.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRequest {
    pub selection: Bounds,
    pub length: AnswerLength,
    pub region: RegionExport,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl RecognitionService for Echo {
        fn recognize(&self, image: Vec<u8>, _region: Bounds) -> BoxFuture<'_, ServiceResult<String>> {
            Box::pin(async move {
                if image.is_empty() {
                    Err(ServiceError::Rejected("empty image".into()))
                } else {
                    Ok(format!("{} bytes", image.len()))
                }
            })
        }
    }

    #[test]
    fn test_service_future_resolves() {
        let service = Echo;
        let region = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let ok = pollster::block_on(service.recognize(vec![1, 2, 3], region));
        assert_eq!(ok, Ok("3 bytes".to_string()));
        let err = pollster::block_on(service.recognize(Vec::new(), region));
        assert_eq!(err, Err(ServiceError::Rejected("empty image".into())));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ServiceError::Unavailable.to_string(), "Service unavailable");
        assert_eq!(
            RequestError::NoSelection.to_string(),
            "There is no selection to answer about"
        );
    }
}
