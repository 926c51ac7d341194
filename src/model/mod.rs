pub mod canvas;
pub mod course_record;
