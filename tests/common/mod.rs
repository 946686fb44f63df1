#![allow(dead_code)]

use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use pack_icons::{AppError, AppResult, ImageGenerator, ImageSize};

/// In-memory backend that records prompts and returns a fixed payload.
/// `fail_on` makes the n-th call (1-based) return an upstream error.
pub struct StubGenerator {
    pub payload: Vec<u8>,
    pub fail_on: Option<usize>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(payload: &[u8]) -> Self {
        StubGenerator { payload: payload.to_vec(), fail_on: None, prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing_on(call: usize) -> Self {
        StubGenerator { fail_on: Some(call), ..Self::new(&[1]) }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str, _size: ImageSize) -> AppResult<Vec<u8>> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        if Some(prompts.len()) == self.fail_on {
            return Err(AppError::Upstream { status: 503, body: "busy".to_string() });
        }
        Ok(self.payload.clone())
    }
}

pub fn write_module(root: &Path, id: &str) {
    fs::write(root.join("module.json"), format!("{{\"id\":\"{}\",\"title\":\"Test\"}}", id)).unwrap();
    fs::create_dir_all(root.join("packs")).unwrap();
}

pub fn write_pack(root: &Path, file: &str, body: &str) {
    fs::write(root.join("packs").join(file), body).unwrap();
}

pub fn read_pack(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join("packs").join(file)).unwrap()
}
