//! Named cache of compiled WGSL modules.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("shader '{name}' has empty source")]
    EmptySource { name: String },

    #[error("shader '{name}' not found in library")]
    NotLoaded { name: String },
}

/// Compiled shader modules by name. Loading a name twice replaces the old
/// module; pipelines already built from it keep their own reference.
#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `source` and stores it under `name`.
    ///
    /// WGSL validation errors go through the device's uncaptured error
    /// handler, which panics by default.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        if source.trim().is_empty() {
            return Err(ShaderError::EmptySource {
                name: name.to_string(),
            });
        }
        debug!("Compiling shader '{name}' ({} bytes)", source.len());

        let module = Arc::new(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        }));

        if self.modules.insert(name.to_string(), module.clone()).is_some() {
            info!("Replaced shader '{name}'");
        } else {
            info!("Loaded shader '{name}'");
        }
        Ok(module)
    }

    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    /// Like [`get`](Self::get), but a missing module is an error.
    pub fn require(&self, name: &str) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.get(name).ok_or_else(|| ShaderError::NotLoaded {
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
