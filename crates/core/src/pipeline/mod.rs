pub mod infrastructure;
pub mod select_sharp_frames_use_case;
pub mod stitch_images_use_case;
