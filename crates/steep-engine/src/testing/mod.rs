//! In-process stand-in for a GL driver.
//!
//! Every stub records its entry-point name and mirrors the driver state the
//! engine relies on (buffer storage, bindings, enabled attributes, draws) in
//! thread-local state, so tests running in parallel never see each other.

mod stubs;

pub(crate) use stubs::{MODELVIEW_LOCATION, PROJECTION_LOCATION, PROJECTION_STACK_DEPTH, TEXTURE_STACK_DEPTH};

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::driver::{Gl, consts};
use crate::loader::{DRIVER_PROCS, FillPolicy, Proc, ProcAddr, ProcTable, SymbolSource};

/// Driver generations the fake can impersonate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum Profile {
    /// Fixed function only: client arrays, matrices, no buffer objects.
    Legacy11,
    /// Fixed function plus buffer objects.
    #[default]
    Compat15,
    /// Compatibility driver with shaders and generic attributes.
    Compat20,
    /// Core profile: no fixed function, vertex array objects.
    Core33,
}

/// Entry-point families, each present or absent as a whole.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Group {
    Base,
    Fixed,
    Buffers,
    Programmable,
    ArrayObjects,
}

impl Profile {
    fn has(self, group: Group) -> bool {
        match group {
            Group::Base => true,
            Group::Fixed => self != Profile::Core33,
            Group::Buffers => self != Profile::Legacy11,
            Group::Programmable => matches!(self, Profile::Compat20 | Profile::Core33),
            Group::ArrayObjects => self == Profile::Core33,
        }
    }

    fn version(self) -> &'static [u8] {
        match self {
            Profile::Legacy11 => b"1.1 Fake\0",
            Profile::Compat15 => b"1.5 Fake\0",
            Profile::Compat20 => b"2.1 Fake\0",
            Profile::Core33 => b"3.3 (Core Profile) Fake\0",
        }
    }
}

/// Attribute pointer as last specified.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Pointer {
    pub size: i32,
    pub stride: i32,
    pub ptr: usize,
    /// Array buffer bound when the pointer was set; 0 for client memory.
    pub buffer: u32,
}

/// One recorded draw with the vertex bytes it would have read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Draw {
    pub mode: u32,
    pub first: i32,
    pub count: i32,
    pub vertices: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Texture {
    pub width: i32,
    pub height: i32,
    pub format: u32,
    pub pixels: Vec<u8>,
    pub params: BTreeMap<u32, i32>,
}

/// Key for generic attribute pointers, kept apart from client array enums.
pub(crate) const fn attrib_key(index: u32) -> u32 {
    0x1_0000 + index
}

#[derive(Default)]
pub(crate) struct FakeState {
    profile: Profile,
    calls: Vec<&'static str>,
    next_name: u32,
    buffers: HashMap<u32, Vec<u8>>,
    bound: HashMap<u32, u32>,
    /// Index buffer binding, which lives in the bound vertex array object.
    elements: HashMap<u32, u32>,
    vao: u32,
    attribs: BTreeMap<u32, BTreeSet<u32>>,
    client_states: BTreeSet<u32>,
    pointers: HashMap<(u32, u32), Pointer>,
    draws: Vec<Draw>,
    enabled: BTreeSet<u32>,
    viewport: [i32; 4],
    cull_face: u32,
    front_face: u32,
    clear_color: [f32; 4],
    program: u32,
    uniforms: HashMap<i32, [f32; 16]>,
    sources: Vec<String>,
    fail_compile: bool,
    fail_link: bool,
    textures: HashMap<u32, Texture>,
    bound_texture: u32,
}

impl FakeState {
    fn gen_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    fn binding(&self, target: u32) -> u32 {
        let slot = match target {
            consts::ELEMENT_ARRAY_BUFFER => self.elements.get(&self.vao),
            _ => self.bound.get(&target),
        };
        slot.copied().unwrap_or(0)
    }

    fn current_attribs(&self) -> Vec<u32> {
        self.attribs.get(&self.vao).map(|s| s.iter().copied().collect()).unwrap_or_default()
    }
}

thread_local! {
    static FAKE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

fn with<R>(f: impl FnOnce(&mut FakeState) -> R) -> R {
    FAKE.with(|state| f(&mut state.borrow_mut()))
}

/// Symbol source exposing the stubs available on one profile.
pub(crate) struct FakeDriver {
    profile: Profile,
}

impl SymbolSource for FakeDriver {
    fn lookup(&self, name: &str) -> Option<Proc> {
        let (group, addr) = stubs::symbol(name)?;
        if !self.profile.has(group) {
            return None;
        }
        ProcAddr::new(addr).map(Proc::Driver)
    }
}

/// Resets this thread's fake driver to `profile`.
pub(crate) fn driver(profile: Profile) -> FakeDriver {
    with(|s| *s = FakeState { profile, ..FakeState::default() });
    FakeDriver { profile }
}

/// Fresh fake driver behind a fully resolved [`Gl`].
pub(crate) fn gl(profile: Profile) -> Gl {
    let mut table = ProcTable::new();
    table.fill(DRIVER_PROCS, FillPolicy::IfEmpty, &driver(profile));
    Gl::new(table)
}

// ── inspection ────────────────────────────────────────────────────────────

pub(crate) fn calls() -> Vec<&'static str> {
    with(|s| s.calls.clone())
}

pub(crate) fn take_calls() -> Vec<&'static str> {
    with(|s| std::mem::take(&mut s.calls))
}

pub(crate) fn buffer_len(name: u32) -> Option<usize> {
    with(|s| s.buffers.get(&name).map(Vec::len))
}

pub(crate) fn buffer_bytes(name: u32) -> Option<Vec<u8>> {
    with(|s| s.buffers.get(&name).cloned())
}

pub(crate) fn bound_buffer(target: u32) -> u32 {
    with(|s| s.binding(target))
}

/// `(size, stride, pointer)` of a client array or [`attrib_key`] on the
/// current vertex array.
pub(crate) fn pointer(key: u32) -> Option<(i32, i32, usize)> {
    with(|s| s.pointers.get(&(s.vao, key)).map(|p| (p.size, p.stride, p.ptr)))
}

pub(crate) fn client_states() -> Vec<u32> {
    with(|s| s.client_states.iter().copied().collect())
}

/// Enabled generic attributes of the current vertex array.
pub(crate) fn enabled_attribs() -> Vec<u32> {
    with(|s| s.current_attribs())
}

pub(crate) fn enabled_attribs_of(vao: u32) -> Vec<u32> {
    with(|s| s.attribs.get(&vao).map(|a| a.iter().copied().collect()).unwrap_or_default())
}

/// Index buffer captured by vertex array object `vao`.
pub(crate) fn index_binding_of(vao: u32) -> u32 {
    with(|s| s.elements.get(&vao).copied().unwrap_or(0))
}

pub(crate) fn bound_vertex_array() -> u32 {
    with(|s| s.vao)
}

pub(crate) fn draws() -> Vec<Draw> {
    with(|s| s.draws.clone())
}

pub(crate) fn enabled() -> Vec<u32> {
    with(|s| s.enabled.iter().copied().collect())
}

/// Culled face and front-face winding, 0 until first set.
pub(crate) fn culling() -> (u32, u32) {
    with(|s| (s.cull_face, s.front_face))
}

pub(crate) fn viewport() -> [i32; 4] {
    with(|s| s.viewport)
}

pub(crate) fn clear_color() -> [f32; 4] {
    with(|s| s.clear_color)
}

pub(crate) fn current_program() -> u32 {
    with(|s| s.program)
}

pub(crate) fn uniform(location: i32) -> Option<[f32; 16]> {
    with(|s| s.uniforms.get(&location).copied())
}

pub(crate) fn texture(name: u32) -> Option<Texture> {
    with(|s| s.textures.get(&name).cloned())
}

pub(crate) fn bound_texture() -> u32 {
    with(|s| s.bound_texture)
}

/// Shader texts handed to the driver, in submission order.
pub(crate) fn shader_sources() -> Vec<String> {
    with(|s| s.sources.clone())
}

pub(crate) fn fail_compile() {
    with(|s| s.fail_compile = true);
}

pub(crate) fn fail_link() {
    with(|s| s.fail_link = true);
}
