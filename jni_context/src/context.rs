use jni::JavaVM;
use once_cell::sync::OnceCell;

use crate::{Error, Result};

/// Process-wide JNI state captured in `JNI_OnLoad`.
pub struct JniContext {
    vm: JavaVM,
}

impl std::fmt::Debug for JniContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JniContext").finish()
    }
}

static CONTEXT: OnceCell<JniContext> = OnceCell::new();

impl JniContext {
    /// Returns JNI context for current dylib. Fails if the library was not
    /// loaded through `System.loadLibrary` (and thus `JNI_OnLoad` never ran).
    pub fn get() -> Result<&'static JniContext> {
        CONTEXT.get().ok_or(Error::NotInitialized)
    }

    /// Returns reference to current process JavaVM.
    pub fn java_vm(&self) -> &JavaVM {
        &self.vm
    }

    // There are obscure reasons why JNI_OnLoad might be called more than once;
    // the first VM wins.
    pub(crate) fn init(vm: JavaVM) -> &'static JniContext {
        CONTEXT.get_or_init(|| JniContext { vm })
    }
}
