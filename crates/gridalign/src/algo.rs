//! The grid operations: reprojection, alignment, cropping with a mask and gap filling.

mod align;
mod cropaligned;
mod fill;
mod reproject;
mod warp;

#[doc(inline)]
pub use align::{align, align_and_crop};
#[doc(inline)]
pub use cropaligned::{AlignmentResult, CropOptions, MismatchDetection, crop_aligned, crop_aligned_with_options};
#[doc(inline)]
pub use fill::{NEIGHBOUR_PRIORITY, fill_isolated};
#[doc(inline)]
pub use reproject::{ReprojectOptions, reproject, reproject_georeference};
#[doc(inline)]
pub use warp::{warp, wrap_longitudes};
