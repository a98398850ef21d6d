pub const DETECTOR_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const DETECTOR_MODEL_URL: &str =
    "https://github.com/swapforge/swapforge/releases/download/v0.1.0/yolov8n-face.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/swapforge/swapforge/releases/download/v0.1.0/w600k_r50.onnx";

pub const SWAPPER_MODEL_NAME: &str = "inswapper_128.onnx";
pub const SWAPPER_MODEL_URL: &str =
    "https://github.com/swapforge/swapforge/releases/download/v0.1.0/inswapper_128.onnx";

/// Fixed detector input resolution (square letterbox).
pub const DETECT_INPUT_SIZE: u32 = 640;

/// Accepted target extensions, scanned in this order. Matching is
/// case-sensitive: uppercase extensions are skipped.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub const REMOTE_API_URL: &str = "https://api.replicate.com/v1/predictions";

/// Pinned version of the hosted face-swap model.
pub const REMOTE_MODEL_VERSION: &str =
    "9a4298548422074c3f57258c5d544497314ae4112df80d116f0d2109e843d20d";

pub const REMOTE_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";
