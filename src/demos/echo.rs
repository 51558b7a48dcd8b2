//! Command line echo
//!
//! Equivalent C:
//!
//! ```c
//! static char banner[16];
//! static void init(void) { strcpy(banner, "clue echo"); }
//!
//! int main(int argc, char** argv) {
//!     printf("%s\n", banner);
//!     printf("argc=%d\n", argc);
//!     for (int i = 0; i < argc; i++)
//!         printf("%2$*1$d: %3$s\n", 2, i, argv[i]);
//!     const char* last = argv[argc - 1];
//!     for (int i = strlen(last) - 1; i >= 0; i--)
//!         putchar(last[i]);
//!     putchar('\n');
//!     return 0;
//! }
//! ```

use super::{literal, printf};
use crate::memory::strings::to_host_string;
use crate::memory::{Pointer, Store, Value};
use crate::runtime::{EntryArgs, InitializerRegistry, Program, Runtime, RuntimeError};

pub struct Echo {
    banner: Store,
}

impl Default for Echo {
    fn default() -> Self {
        Echo {
            banner: Store::filled(16, Value::Int(0)),
        }
    }
}

impl Program for Echo {
    fn register_initializers(&mut self, registry: &mut InitializerRegistry) -> Result<(), RuntimeError> {
        let banner = Pointer::to_start(self.banner.clone());
        registry.register(move || {
            crate::memory::strings::copy(&banner, &literal("clue echo"));
        })
    }

    fn main(&mut self, rt: &mut Runtime, entry: EntryArgs) -> Result<i64, RuntimeError> {
        let banner = Pointer::to_start(self.banner.clone());
        printf(rt, &literal("%s\n"), &banner.to_pair())?;
        printf(rt, &literal("argc=%d\n"), &[Value::Int(entry.argc as i64)])?;

        let line = literal("%2$*1$d: %3$s\n");
        for i in 0..entry.argc {
            let mut args = vec![Value::Int(2), Value::Int(i as i64)];
            args.extend(Pointer::pair_of(entry.arg_pointer(i).as_ref()));
            printf(rt, &line, &args)?;
        }

        if let Some(last) = entry.argc.checked_sub(1).and_then(|i| entry.arg_pointer(i)) {
            let len = to_host_string(&last).chars().count();
            for i in (0..len).rev() {
                rt.call("putchar", &[last.read(i)])?;
            }
            rt.call("putchar", &[Value::Int('\n' as i64)])?;
        }

        Ok(0)
    }
}
