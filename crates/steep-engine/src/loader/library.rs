use std::ffi::{CString, c_char, c_void};

use libloading::Library;

use super::symbol::{Proc, ProcAddr, SymbolSource};
use crate::error::{Error, Result};

#[cfg(target_os = "windows")]
const LIBRARY_NAMES: &[&str] = &["opengl32.dll"];

#[cfg(target_os = "macos")]
const LIBRARY_NAMES: &[&str] = &[
    "../Frameworks/OpenGL.framework/OpenGL",
    "/Library/Frameworks/OpenGL.framework/OpenGL",
    "/System/Library/Frameworks/OpenGL.framework/OpenGL",
    "/System/Library/Frameworks/OpenGL.framework/Versions/Current/OpenGL",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_NAMES: &[&str] = &["libGL.so.1", "libGL.so"];

#[cfg(target_os = "windows")]
const GET_PROC_NAMES: &[&str] = &["wglGetProcAddress"];

#[cfg(target_os = "macos")]
const GET_PROC_NAMES: &[&str] = &[];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const GET_PROC_NAMES: &[&str] = &["glXGetProcAddressARB", "glXGetProcAddress"];

type GetProcAddress = unsafe extern "system" fn(*const c_char) -> *const c_void;

/// The platform OpenGL module, kept open for as long as resolved addresses
/// may be called.
pub struct DriverLibrary {
    library: Library,
    get_proc: Option<GetProcAddress>,
    path: &'static str,
}

impl DriverLibrary {
    /// Opens the first platform library name that loads.
    pub fn open() -> Result<Self> {
        Self::open_any(LIBRARY_NAMES)
    }

    pub fn open_any(candidates: &[&'static str]) -> Result<Self> {
        for &path in candidates {
            // SAFETY: loading the system GL module runs its initializers, which
            // is the expected way to bring up the driver.
            match unsafe { Library::new(path) } {
                Ok(library) => {
                    let get_proc = GET_PROC_NAMES.iter().find_map(|name| {
                        // SAFETY: the symbol is declared with its documented
                        // signature on every platform that exports it.
                        unsafe { library.get::<GetProcAddress>(name.as_bytes()) }
                            .ok()
                            .map(|sym| *sym)
                    });
                    log::info!(
                        "opened GL driver module {path} (proc-address entry: {})",
                        if get_proc.is_some() { "yes" } else { "no" }
                    );
                    return Ok(Self { library, get_proc, path });
                }
                Err(err) => log::debug!("cannot open {path}: {err}"),
            }
        }
        Err(Error::DriverNotFound { tried: candidates.join(", ") })
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    fn module_symbol(&self, name: &str) -> Option<ProcAddr> {
        // SAFETY: the symbol is only read as an address, never dereferenced.
        let sym = unsafe { self.library.get::<*const c_void>(name.as_bytes()) }.ok()?;
        ProcAddr::new(*sym)
    }
}

impl SymbolSource for DriverLibrary {
    fn lookup(&self, name: &str) -> Option<Proc> {
        if let Some(get_proc) = self.get_proc {
            let cname = CString::new(name).ok()?;
            // SAFETY: `cname` is NUL-terminated and outlives the call.
            let ptr = unsafe { get_proc(cname.as_ptr()) };
            if let Some(addr) = valid_proc_address(ptr) {
                return Some(Proc::Driver(addr));
            }
        }
        self.module_symbol(name).map(Proc::Driver)
    }
}

/// Some `*GetProcAddress` implementations return small sentinel values
/// instead of null for unknown names.
fn valid_proc_address(ptr: *const c_void) -> Option<ProcAddr> {
    match ptr as isize {
        -1 | 0..=3 => None,
        _ => ProcAddr::new(ptr),
    }
}
