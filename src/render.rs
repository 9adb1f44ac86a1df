//! Turns a visualization result into what the results area shows.

use crate::api::{ImageUrls, VisualizationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Input,
    Processed,
    Output,
}

impl ImageKind {
    pub fn caption(self) -> &'static str {
        match self {
            ImageKind::Input => "Input",
            ImageKind::Processed => "Processed input",
            ImageKind::Output => "Output",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub kind: ImageKind,
    pub file_name: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    pub name: String,
    pub prob: f64,
}

impl LabelRow {
    pub fn text(&self) -> String {
        format!("{}: {}", self.name, self.prob)
    }
}

/// Everything one render pass puts on screen, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultView {
    pub images: Vec<RenderedImage>,
    pub labels: Vec<LabelRow>,
}

impl ResultView {
    pub fn count(&self, kind: ImageKind) -> usize {
        self.images.iter().filter(|i| i.kind == kind).count()
    }
}

/// Input image always; processed image only when flagged; output images
/// only when flagged, in server order; then one label per class probability.
pub fn render_result(result: &VisualizationResult, urls: &ImageUrls) -> ResultView {
    let mut images = vec![RenderedImage {
        kind: ImageKind::Input,
        file_name: result.input_file_name.clone(),
        src: urls.input(&result.input_file_name),
    }];

    if result.has_processed_input {
        match result.processed_input_file_name.as_deref() {
            Some(name) => images.push(RenderedImage {
                kind: ImageKind::Processed,
                file_name: name.to_string(),
                src: urls.output(name),
            }),
            None => log::warn!("Result flags a processed input but names no file"),
        }
    }

    if result.has_output {
        for name in result.output_file_names.iter().flatten() {
            images.push(RenderedImage {
                kind: ImageKind::Output,
                file_name: name.clone(),
                src: urls.output(name),
            });
        }
    }

    let labels = result
        .predict_probs
        .iter()
        .map(|p| LabelRow {
            name: p.name.clone(),
            prob: p.prob,
        })
        .collect();

    ResultView { images, labels }
}
