use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

use crate::matrix::Shim;

/// Non-null address of a resolved driver entry point.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProcAddr(NonNull<c_void>);

impl ProcAddr {
    /// Wraps a raw address; null yields `None`.
    #[inline]
    pub fn new(ptr: *const c_void) -> Option<Self> {
        NonNull::new(ptr as *mut c_void).map(Self)
    }

    #[inline]
    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for ProcAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcAddr({:p})", self.0)
    }
}

/// Content of one procedure-table slot.
///
/// `Driver` is an address inside the loaded driver module. `Emulated` is an
/// in-process replacement installed by an override pass.
#[derive(Copy, Clone)]
pub enum Proc {
    Driver(ProcAddr),
    Emulated(Shim),
}

impl Proc {
    #[inline]
    pub fn driver(self) -> Option<ProcAddr> {
        match self {
            Proc::Driver(addr) => Some(addr),
            Proc::Emulated(_) => None,
        }
    }

    #[inline]
    pub fn is_emulated(self) -> bool {
        matches!(self, Proc::Emulated(_))
    }
}

impl fmt::Debug for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proc::Driver(addr) => addr.fmt(f),
            Proc::Emulated(_) => f.write_str("Emulated"),
        }
    }
}

/// Anything that can turn an entry-point name into a [`Proc`].
///
/// A miss is expected (older or restricted drivers omit whole extensions) and
/// is reported as `None`, never as an error.
pub trait SymbolSource {
    fn lookup(&self, name: &str) -> Option<Proc>;
}

impl<S: SymbolSource + ?Sized> SymbolSource for &S {
    fn lookup(&self, name: &str) -> Option<Proc> {
        (**self).lookup(name)
    }
}

/// Returns the first name variant the source resolves, querying each name at
/// most once and in order.
pub fn resolve(source: &dyn SymbolSource, names: &[&str]) -> Option<Proc> {
    names.iter().find_map(|name| source.lookup(name))
}

/// Adapts a window/context provider's `get_proc_address` function.
pub struct LoaderFn<F>(pub F);

impl<F> SymbolSource for LoaderFn<F>
where
    F: Fn(&str) -> *const c_void,
{
    fn lookup(&self, name: &str) -> Option<Proc> {
        ProcAddr::new((self.0)(name)).map(Proc::Driver)
    }
}
