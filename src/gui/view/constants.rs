//! View constants (layout/sizing).

pub(crate) const TRANSPORT_H: f32 = 76.0;

pub(crate) const SIDEBAR_W: f32 = 260.0;
pub(crate) const PANE_W: f32 = 320.0;

pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 14.0;

pub(crate) const TRACK_ROW_H: f32 = 26.0;
pub(crate) const TRACK_ROW_VPAD: f32 = 2.0;
pub(crate) const TRACK_ROW_HPAD: f32 = 8.0;
pub(crate) const TRACK_LIST_SPACING: f32 = 1.0;

pub(crate) const QUEUE_LIST_H: f32 = 160.0;

pub(crate) const COVER_BIG: f32 = 220.0;
pub(crate) const COVER_PREVIEW: f32 = 180.0;
