/// Inswapper-style face compositor using ONNX Runtime via `ort`.
///
/// Crops a square region around the target face, runs the swap model with
/// the source identity latent, and pastes the result back with feathered
/// edges so the seam doesn't show as a hard rectangle.
use std::path::Path;

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::infrastructure::execution_provider::preferred_execution_providers;
use crate::shared::frame::Frame;
use crate::swapping::domain::face_swapper::FaceSwapper;

/// Swap model input resolution (square).
const SWAP_INPUT_SIZE: usize = 128;

/// Extra margin around the detected bbox, as a fraction of its larger side.
const CROP_MARGIN: f64 = 0.25;

/// Width of the linear blend ramp at the pasted region's edges, in pixels.
const EDGE_FEATHER_PX: usize = 8;

/// Face compositor backed by an ONNX Runtime session.
pub struct OnnxInswapper {
    session: ort::session::Session,
}

impl OnnxInswapper {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let intra_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_inter_threads(1)?
            .with_intra_threads(intra_threads)?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;
        Ok(Self { session })
    }
}

impl FaceSwapper for OnnxInswapper {
    fn swap(
        &mut self,
        frame: &mut Frame,
        target: &DetectedFace,
        source_embedding: &[f32],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let region = square_crop_box(&target.bbox, frame.width(), frame.height())
            .ok_or("Face region is empty after clamping")?;

        // 1. Crop + resize to model input, normalized to [0, 1]
        let blob = crop_to_blob(frame, &region);

        // 2. Source latent: unit-norm identity vector
        let mut latent = source_embedding.to_vec();
        normalize_latent(&mut latent);
        let latent_tensor = ndarray::Array2::from_shape_vec((1, latent.len()), latent)?;

        // 3. Inference: (target blob, source latent) → swapped face blob
        let blob_value = ort::value::Tensor::from_array(blob)?;
        let latent_value = ort::value::Tensor::from_array(latent_tensor)?;
        let outputs = self.session.run(ort::inputs![blob_value, latent_value])?;
        let out = outputs[0].try_extract_array::<f32>()?;
        let out_shape = out.shape();
        if out_shape.len() != 4 || out_shape[2] != SWAP_INPUT_SIZE || out_shape[3] != SWAP_INPUT_SIZE
        {
            return Err(format!("Unexpected swap output shape: {out_shape:?}").into());
        }
        let out_data = out.as_slice().ok_or("Cannot get swap output slice")?;

        // 4. Paste back with feathered edges
        paste_back(frame, &region, out_data);
        Ok(())
    }
}

/// Integer crop region within the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CropBox {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Square region centered on the bbox, expanded by [`CROP_MARGIN`] and
/// clamped to the frame. Clamping may make the result non-square at frame
/// edges. Returns `None` for a degenerate region.
fn square_crop_box(bbox: &[f64; 4], frame_w: u32, frame_h: u32) -> Option<CropBox> {
    let cx = (bbox[0] + bbox[2]) / 2.0;
    let cy = (bbox[1] + bbox[3]) / 2.0;
    let side = (bbox[2] - bbox[0]).max(bbox[3] - bbox[1]) * (1.0 + 2.0 * CROP_MARGIN);
    if side <= 0.0 {
        return None;
    }

    let fw = frame_w as i64;
    let fh = frame_h as i64;
    let x1 = ((cx - side / 2.0).floor() as i64).clamp(0, fw);
    let y1 = ((cy - side / 2.0).floor() as i64).clamp(0, fh);
    let x2 = ((cx + side / 2.0).ceil() as i64).clamp(0, fw);
    let y2 = ((cy + side / 2.0).ceil() as i64).clamp(0, fh);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some(CropBox {
        x: x1 as usize,
        y: y1 as usize,
        width: (x2 - x1) as usize,
        height: (y2 - y1) as usize,
    })
}

/// Nearest-neighbor resample of the crop region into an NCHW blob in [0, 1].
fn crop_to_blob(frame: &Frame, region: &CropBox) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let mut blob = ndarray::Array4::<f32>::zeros((1, 3, SWAP_INPUT_SIZE, SWAP_INPUT_SIZE));

    for y in 0..SWAP_INPUT_SIZE {
        let src_y = region.y
            + (((y as f64 + 0.5) * region.height as f64 / SWAP_INPUT_SIZE as f64) as usize)
                .min(region.height - 1);
        for x in 0..SWAP_INPUT_SIZE {
            let src_x = region.x
                + (((x as f64 + 0.5) * region.width as f64 / SWAP_INPUT_SIZE as f64) as usize)
                    .min(region.width - 1);
            for c in 0..3 {
                blob[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    blob
}

/// L2-normalize the identity vector fed to the swap model.
fn normalize_latent(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Blend weight for a pixel at `(dx, dy)` from the region's nearest edges.
/// Ramps linearly from 0 at the edge to 1 at [`EDGE_FEATHER_PX`] inward.
fn feather_weight(dx: usize, dy: usize, region_w: usize, region_h: usize) -> f32 {
    let right = region_w.saturating_sub(dx + 1);
    let bottom = region_h.saturating_sub(dy + 1);
    let edge_dist = dx.min(dy).min(right).min(bottom);
    (edge_dist.min(EDGE_FEATHER_PX) as f32) / EDGE_FEATHER_PX as f32
}

/// Resample the 128×128 model output back to region size and blend it into
/// the frame with a feathered edge mask.
fn paste_back(frame: &mut Frame, region: &CropBox, out_data: &[f32]) {
    let rw = region.width;
    let rh = region.height;
    let mut dst = frame.as_ndarray_mut();

    for dy in 0..rh {
        let sy = (((dy as f64 + 0.5) * SWAP_INPUT_SIZE as f64 / rh as f64) as usize)
            .min(SWAP_INPUT_SIZE - 1);
        for dx in 0..rw {
            let sx = (((dx as f64 + 0.5) * SWAP_INPUT_SIZE as f64 / rw as f64) as usize)
                .min(SWAP_INPUT_SIZE - 1);
            let alpha = feather_weight(dx, dy, rw, rh);
            if alpha == 0.0 {
                continue;
            }
            for c in 0..3 {
                let swapped =
                    (out_data[c * SWAP_INPUT_SIZE * SWAP_INPUT_SIZE + sy * SWAP_INPUT_SIZE + sx]
                        .clamp(0.0, 1.0))
                        * 255.0;
                let fy = region.y + dy;
                let fx = region.x + dx;
                let existing = dst[[fy, fx, c]] as f32;
                dst[[fy, fx, c]] = (existing + alpha * (swapped - existing)).round() as u8;
            }
        }
    }
}
