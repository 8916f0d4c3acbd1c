pub mod threaded_frame_selector;
