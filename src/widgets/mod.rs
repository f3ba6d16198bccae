pub mod clock_face;
