use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    EditRequest, EditedImage, EnhanceRequest, EnhancedImage, GenerateRequest, GeneratedImage,
    ImageAnalysis, StyleRequest, StyledImage,
};

/// Produces and transforms images. Every call may suspend; none of them touch
/// session state.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate(&self, req: GenerateRequest) -> Result<GeneratedImage>;

    async fn edit(&self, req: EditRequest) -> Result<EditedImage>;

    async fn enhance(&self, req: EnhanceRequest) -> Result<EnhancedImage>;

    async fn style_transfer(&self, req: StyleRequest) -> Result<StyledImage>;

    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis>;
}
