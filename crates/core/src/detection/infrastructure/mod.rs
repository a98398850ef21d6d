pub mod execution_provider;
pub mod onnx_face_analyzer;
