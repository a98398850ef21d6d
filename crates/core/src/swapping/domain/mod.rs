pub mod face_swapper;
