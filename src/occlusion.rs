//! UI occlusion test consumed by the engine.

use crate::gesture::ContactId;
use crate::math::Vec2;

/// Answers whether a contact is over foreground UI
///
/// Contacts that begin over UI are tracked but report no gestures; a release
/// over UI suppresses taps.
pub trait OcclusionOracle {
    fn is_occluded(&self, position: Vec2, id: ContactId) -> bool;
}

/// Oracle for applications without overlay UI
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl OcclusionOracle for NoOcclusion {
    fn is_occluded(&self, _position: Vec2, _id: ContactId) -> bool {
        false
    }
}

impl<F> OcclusionOracle for F
where
    F: Fn(Vec2, ContactId) -> bool,
{
    fn is_occluded(&self, position: Vec2, id: ContactId) -> bool {
        self(position, id)
    }
}
