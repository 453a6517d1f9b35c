//! Creative asset kinds.

use crate::text_enum::define_text_enum;

define_text_enum! {
    /// Media type of a creative.
    CreativeType("creative type") {
        Image = "IMAGE",
        Video = "VIDEO",
        Text = "TEXT",
        Audio = "AUDIO",
    }
}
