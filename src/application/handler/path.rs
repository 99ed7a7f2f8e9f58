use crate::application::service::model::TopicId;
use crate::common::constants::MAX_PATH_SEGMENTS;
use crate::http::request::percent_decode;

/// Reject paths nested deeper than the deployment ever routes.
///
/// Segments are counted the way `str::split('/')` yields them, so the empty
/// segment before the leading slash counts too.
pub fn is_valid_depth(path: &str) -> bool {
    path.split('/').count() <= MAX_PATH_SEGMENTS
}

/// Identifier in the segment following `resource`, percent-decoded.
///
/// `None` when the resource segment is missing or nothing non-empty follows it.
pub fn target_id(path: &str, resource: &str) -> Option<TopicId> {
    let mut segments = path.split('/');
    segments.find(|segment| *segment == resource)?;
    let raw = segments.next().filter(|segment| !segment.is_empty())?;
    Some(TopicId::new(percent_decode(raw)))
}
