//! # Windowing, Bucketing, and Padding
//!
//! * [`Windower`] / [`DialogueCursor`] - cap dialogues to windows, carried across steps,
//! * [`BucketingBatcher`] - group cursors of similar length,
//! * [`DialogueGroup`] - step a released group, one window per slot,
//! * [`PaddingAssembler`] - pad a step into a dense [`Batch`].
pub mod batch;
pub mod bucketing;
pub mod padding;
pub mod tensor;
pub mod windower;

#[doc(inline)]
pub use batch::{Batch, SlotInfo};
#[doc(inline)]
pub use bucketing::BucketingBatcher;
#[doc(inline)]
pub use padding::PaddingAssembler;
#[doc(inline)]
pub use tensor::{Tensor2, Tensor3};
#[doc(inline)]
pub use windower::{DialogueCursor, DialogueGroup, Window, WindowContent, Windower};
