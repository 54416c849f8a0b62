//! Drive the blur pipeline on a dedicated device.
use crate::Settings;
use crate::blur::{self, Pipeline, Targets};
use crate::core::{Error, PixelBuffer, Result, Size};
use crate::graphics::Backend;
use crate::graphics::blur::box_radius;

use std::sync::mpsc;

/// A hardware-accelerated blur backend.
///
/// It owns a dedicated [`wgpu::Device`], the blur [`Pipeline`], and the
/// textures bound to the current render target size.
#[derive(Debug)]
pub struct Engine {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter: wgpu::AdapterInfo,
    pipeline: Pipeline,
    targets: Option<Targets>,
    radius: u32,
}

impl Engine {
    /// Creates a new [`Engine`], blocking until an adapter and a device are
    /// available.
    ///
    /// Fails with [`Error::EngineUnavailable`] if no suitable adapter exists
    /// or the device cannot be created.
    pub fn new(settings: Settings) -> Result<Self> {
        pollster::block_on(Self::request(settings))
    }

    async fn request(settings: Settings) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: settings.backends,
            ..wgpu::InstanceDescriptor::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference,
                force_fallback_adapter: settings.force_fallback_adapter,
                compatible_surface: None,
            })
            .await
            .map_err(|error| Error::EngineUnavailable(error.to_string()))?;

        let info = adapter.get_info();

        log::debug!(
            "Selected adapter: {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("blurring_wgpu.device"),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                ..wgpu::DeviceDescriptor::default()
            })
            .await
            .map_err(|error| Error::EngineUnavailable(error.to_string()))?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = Pipeline::new(&device);

        if let Some(error) = device.pop_error_scope().await {
            return Err(Error::EngineUnavailable(error.to_string()));
        }

        Ok(Self {
            device,
            queue,
            adapter: info,
            pipeline,
            targets: None,
            radius: 0,
        })
    }

    /// Returns information about the adapter the [`Engine`] runs on.
    pub fn adapter(&self) -> &wgpu::AdapterInfo {
        &self.adapter
    }

    /// Runs the given closure inside a validation error scope, turning any
    /// error raised by `wgpu` into an [`Error::Backend`].
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let result = f(self);

        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(Error::Backend(error.to_string())),
            None => result,
        }
    }

    fn blur(&self, targets: &Targets, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()> {
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: targets.input(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            input.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(input.stride() as u32),
                rows_per_image: Some(input.height()),
            },
            targets.extent(),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("blurring_wgpu.blur.encoder"),
            });

        self.pipeline.render(&mut encoder, targets);

        let index = self.queue.submit(Some(encoder.finish()));

        self.read_back(targets, index, output)
    }

    fn read_back(
        &self,
        targets: &Targets,
        index: wgpu::SubmissionIndex,
        output: &mut PixelBuffer,
    ) -> Result<()> {
        let slice = targets.readback().slice(..);
        let (sender, receiver) = mpsc::channel();

        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        let _ = self
            .device
            .poll(wgpu::PollType::Wait {
                submission_index: Some(index),
                timeout: None,
            })
            .map_err(|error| Error::Backend(error.to_string()))?;

        receiver
            .recv()
            .map_err(|_| Error::Backend(String::from("readback buffer mapping was dropped")))?
            .map_err(|error| Error::Backend(error.to_string()))?;

        {
            let padded = targets.padded_bytes_per_row() as usize;
            let stride = output.stride();
            let mapped = slice.get_mapped_range();

            for (row, padded_row) in output
                .data_mut()
                .chunks_exact_mut(stride)
                .zip(mapped.chunks(padded))
            {
                row.copy_from_slice(&padded_row[..stride]);
            }
        }

        targets.readback().unmap();

        Ok(())
    }
}

impl Backend for Engine {
    fn radius(&self) -> u32 {
        self.radius
    }

    fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
        self.pipeline.set_box_radius(&self.queue, box_radius(radius));
    }

    fn bind(&mut self, size: Size<u32>) -> Result<()> {
        if self.targets.as_ref().is_some_and(|targets| targets.size() == size) {
            return Ok(());
        }

        self.targets = None;

        let targets = self.scoped(|engine| Ok(Targets::new(&engine.device, &engine.pipeline, size)))?;

        log::trace!(
            "blur textures created: {}x{} ({} bytes per readback row)",
            size.width,
            size.height,
            blur::padded_bytes_per_row(size.width)
        );

        self.targets = Some(targets);

        Ok(())
    }

    fn run(&mut self, input: &PixelBuffer, output: &mut PixelBuffer) -> Result<()> {
        let Some(targets) = self.targets.take() else {
            return Err(Error::Backend(String::from(
                "hardware blur was run before being bound",
            )));
        };

        let size = targets.size();

        if input.size() != size || output.size() != size {
            self.targets = Some(targets);

            return Err(Error::Backend(format!(
                "buffer size mismatch: bound to {size:?}, got {:?} -> {:?}",
                input.size(),
                output.size()
            )));
        }

        let result = self.scoped(|engine| engine.blur(&targets, input, output));
        self.targets = Some(targets);

        result
    }
}
