// SPDX-License-Identifier: MPL-2.0

//! Recording GL context for integration tests
//!
//! Every call is appended to a log so tests can assert on upload order and
//! resource lifetimes without a real driver.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use yuv2rgb_shader::errors::{ShaderError, ShaderResult};
use yuv2rgb_shader::gpu::GlContext;
use yuv2rgb_shader::shaders::OutputStage;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileAndLink(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    Uniform1i(String, i32),
    Uniform1f(String, f32),
    Uniform2f(String, f32, f32),
    UniformMatrix4(String, [f32; 16]),
    ActiveTexture(u32),
    CreateTexture(u32),
    DeleteTexture(u32),
    BindTexture1d(Option<u32>),
    LinearFiltering,
    UploadTexture1d(u32, Vec<f32>),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_id: u32,
    live_programs: BTreeSet<u32>,
    live_textures: BTreeSet<u32>,
    double_frees: usize,
    active_unit: u32,
    bound_1d: BTreeMap<u32, u32>,
    missing_uniforms: HashSet<String>,
    fail_link: bool,
    last_vertex: String,
    last_pixel: String,
}

#[derive(Default)]
pub struct FakeGl {
    state: Mutex<State>,
}

impl FakeGl {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `uniform_location` report these names as inactive
    pub fn with_missing_uniforms(names: &[&str]) -> Arc<Self> {
        let gl = Self::default();
        gl.state
            .lock()
            .unwrap()
            .missing_uniforms
            .extend(names.iter().map(|n| n.to_string()));
        Arc::new(gl)
    }

    pub fn set_fail_link(&self, fail: bool) {
        self.state.lock().unwrap().fail_link = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn live_textures(&self) -> usize {
        self.state.lock().unwrap().live_textures.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.lock().unwrap().live_programs.len()
    }

    pub fn double_frees(&self) -> usize {
        self.state.lock().unwrap().double_frees
    }

    pub fn active_unit(&self) -> u32 {
        self.state.lock().unwrap().active_unit
    }

    /// 1D texture bound on `unit`, if any
    pub fn bound_1d(&self, unit: u32) -> Option<u32> {
        self.state.lock().unwrap().bound_1d.get(&unit).copied()
    }

    pub fn last_pixel_source(&self) -> String {
        self.state.lock().unwrap().last_pixel.clone()
    }

    pub fn last_vertex_source(&self) -> String {
        self.state.lock().unwrap().last_vertex.clone()
    }

    /// Kernel texel uploads in call order
    pub fn uploads(&self) -> Vec<Vec<f32>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UploadTexture1d(_, texels) => Some(texels),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl GlContext for FakeGl {
    type Program = u32;
    type UniformLocation = String;
    type Texture = u32;

    fn compile_and_link(&self, vertex_src: &str, pixel_src: &str) -> ShaderResult<u32> {
        let mut state = self.state.lock().unwrap();
        state.last_vertex = vertex_src.to_string();
        state.last_pixel = pixel_src.to_string();
        if state.fail_link {
            return Err(ShaderError::Link("fake link failure".to_string()));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.live_programs.insert(id);
        state.calls.push(Call::CompileAndLink(id));
        Ok(id)
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.lock().unwrap();
        if !state.live_programs.remove(&program) {
            state.double_frees += 1;
        }
        state.calls.push(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        if state.missing_uniforms.contains(name) {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        Some(name.len() as u32)
    }

    fn uniform_1i(&self, location: Option<&String>, value: i32) {
        if let Some(name) = location {
            self.record(Call::Uniform1i(name.clone(), value));
        }
    }

    fn uniform_1f(&self, location: Option<&String>, value: f32) {
        if let Some(name) = location {
            self.record(Call::Uniform1f(name.clone(), value));
        }
    }

    fn uniform_2f(&self, location: Option<&String>, x: f32, y: f32) {
        if let Some(name) = location {
            self.record(Call::Uniform2f(name.clone(), x, y));
        }
    }

    fn uniform_matrix4(&self, location: Option<&String>, matrix: &[f32; 16]) {
        if let Some(name) = location {
            self.record(Call::UniformMatrix4(name.clone(), *matrix));
        }
    }

    fn active_texture(&self, unit: u32) {
        let mut state = self.state.lock().unwrap();
        state.active_unit = unit;
        state.calls.push(Call::ActiveTexture(unit));
    }

    fn create_texture(&self) -> ShaderResult<u32> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.live_textures.insert(id);
        state.calls.push(Call::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&self, texture: u32) {
        let mut state = self.state.lock().unwrap();
        if !state.live_textures.remove(&texture) {
            state.double_frees += 1;
        }
        state.bound_1d.retain(|_, bound| *bound != texture);
        state.calls.push(Call::DeleteTexture(texture));
    }

    fn bind_texture_1d(&self, texture: Option<u32>) {
        let mut state = self.state.lock().unwrap();
        let unit = state.active_unit;
        match texture {
            Some(id) => state.bound_1d.insert(unit, id),
            None => state.bound_1d.remove(&unit),
        };
        state.calls.push(Call::BindTexture1d(texture));
    }

    fn set_texture_1d_linear_filtering(&self) {
        self.record(Call::LinearFiltering);
    }

    fn upload_texture_1d_rgba32f(&self, width: u32, texels: &[f32]) {
        self.record(Call::UploadTexture1d(width, texels.to_vec()));
    }

    fn check_error(&self) -> Option<String> {
        None
    }
}

/// Lifecycle counters shared between a test and its [`CountingOutput`]
#[derive(Default)]
pub struct OutputCounters {
    pub linked: AtomicUsize,
    pub enabled: AtomicUsize,
    pub disabled: AtomicUsize,
    pub freed: AtomicUsize,
}

impl OutputCounters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Output stage that only counts its lifecycle calls
pub struct CountingOutput {
    pub counters: Arc<OutputCounters>,
}

impl CountingOutput {
    pub fn boxed() -> (Box<dyn OutputStage<FakeGl>>, Arc<OutputCounters>) {
        let counters = Arc::new(OutputCounters::default());
        let stage = Box::new(CountingOutput {
            counters: Arc::clone(&counters),
        });
        (stage, counters)
    }
}

impl OutputStage<FakeGl> for CountingOutput {
    fn defines(&self) -> String {
        "#define TEST_OUTPUT 1\n".to_string()
    }

    fn on_compiled_and_linked(&mut self, _ctx: &FakeGl, _program: u32) {
        self.counters.linked.fetch_add(1, Ordering::SeqCst);
    }

    fn on_enabled(&mut self, _ctx: &FakeGl) {
        self.counters.enabled.fetch_add(1, Ordering::SeqCst);
    }

    fn on_disabled(&mut self, _ctx: &FakeGl) {
        self.counters.disabled.fetch_add(1, Ordering::SeqCst);
    }

    fn free(&mut self, _ctx: &FakeGl) {
        self.counters.freed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Layer counting ERROR events
struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber installed on this thread and return how many
/// ERROR events it logged
pub fn count_errors<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = Registry::default().with(ErrorCounter {
        count: Arc::clone(&count),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
