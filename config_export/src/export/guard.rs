//! Scoped extension of the export key prefix.

use std::ops::{Deref, DerefMut};

use super::ExportContext;

/// Extends the context's key prefix for the lifetime of the guard and
/// restores its previous length when dropped, on every exit path.
pub(super) struct PrefixGuard<'c, S> {
    ctx: &'c mut ExportContext<S>,
    len: usize,
}

impl<'c, S> PrefixGuard<'c, S> {
    pub(super) fn new(ctx: &'c mut ExportContext<S>) -> Self {
        let len = ctx.prefix.len();
        Self { ctx, len }
    }

    pub(super) fn push(&mut self, segment: &str) {
        self.ctx.prefix.push_str(segment);
    }

    pub(super) fn push_char(&mut self, ch: char) {
        self.ctx.prefix.push(ch);
    }
}

impl<S> Deref for PrefixGuard<'_, S> {
    type Target = ExportContext<S>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<S> DerefMut for PrefixGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl<S> Drop for PrefixGuard<'_, S> {
    fn drop(&mut self) {
        self.ctx.prefix.truncate(self.len);
    }
}

#[cfg(test)]
mod tests {
    use super::PrefixGuard;
    use crate::{export::ExportContext, options::ExportOptions, sink::EntryCollector};

    #[test]
    fn nested_guards_restore_the_prefix() {
        let mut ctx = ExportContext::new(ExportOptions::default(), EntryCollector::new());
        {
            let mut outer = PrefixGuard::new(&mut ctx);
            outer.push("service/imap/");
            {
                let mut inner = PrefixGuard::new(&mut outer);
                inner.push("inet_listener/imap/");
                assert_eq!(inner.prefix, "service/imap/inet_listener/imap/");
            }
            assert_eq!(outer.prefix, "service/imap/");
        }
        assert!(ctx.prefix.is_empty());
    }

    #[test]
    fn prefix_is_restored_during_unwinding() {
        let mut ctx = ExportContext::new(ExportOptions::default(), EntryCollector::new());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = PrefixGuard::new(&mut ctx);
            guard.push("service/0/");
            panic!("sink aborted");
        }));
        assert!(result.is_err());
        assert!(ctx.prefix.is_empty());
    }
}
