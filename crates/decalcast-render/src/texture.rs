//! GPU upload helpers for decal textures.
//!
//! The engine owns the device and queue; these helpers cover the one piece of
//! GPU plumbing the decal subsystem needs, turning an [`ImageFrame`] into a
//! sampleable RGBA texture.

use decalcast_core::ImageFrame;

/// Rounds a tightly packed RGBA row up to the copy alignment wgpu requires
/// for buffer-mediated texture copies.
#[must_use]
pub fn aligned_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Creates an RGBA texture sized for `frame`.
#[must_use]
pub fn create_decal_texture(
    device: &wgpu::Device,
    frame: &ImageFrame,
    label: Option<&str>,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label,
        size: wgpu::Extent3d {
            width: frame.width(),
            height: frame.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

/// Uploads `frame`'s pixels into `texture`, normalizing the encoding to RGBA.
///
/// The texture must have been created for the same dimensions. `write_texture`
/// takes tightly packed rows, so no row padding is needed here.
pub fn upload_frame(queue: &wgpu::Queue, texture: &wgpu::Texture, frame: &ImageFrame) {
    let rgba = frame.to_rgba8();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(frame.width() * 4),
            rows_per_image: Some(frame.height()),
        },
        wgpu::Extent3d {
            width: frame.width(),
            height: frame.height(),
            depth_or_array_layers: 1,
        },
    );
}
