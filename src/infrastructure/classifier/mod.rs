pub mod lexicon;
pub mod onnx;
