use callorder_rs::{CallOrder, CallOrderError, SequenceRegistry};
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn abc(repeatable: bool) -> Arc<SequenceRegistry<&'static str>> {
        SequenceRegistry::new("T", [CallOrder::new(["a", "b", "c"]).repeatable(repeatable)])
    }

    // --- Ordering ---

    #[test]
    fn test_in_order_calls_succeed() {
        let t = abc(false).track(());
        for method in ["a", "b", "c"] {
            assert!(t.call(method, |_| ()).is_ok());
        }
    }

    #[test]
    fn test_skip_reports_found_and_expected() {
        let t = abc(false).track(());
        t.call("a", |_| ()).unwrap();
        match t.call("c", |_| ()) {
            Err(CallOrderError::OutOfOrder { found, expected }) => {
                assert_eq!(found, "c");
                assert_eq!(expected, "b");
            }
            other => panic!("expected out-of-order, got {other:?}"),
        }
    }

    #[test]
    fn test_correct_retry_resumes_sequence() {
        let t = abc(false).track(());
        t.call("a", |_| ()).unwrap();
        t.call("c", |_| ()).unwrap_err();
        t.call("b", |_| ()).unwrap();
        t.call("c", |_| ()).unwrap();
    }

    // --- Exhaustion and cycling ---

    #[test]
    fn test_single_pass_exhausts() {
        let t = abc(false).track(());
        for method in ["a", "b", "c"] {
            t.call(method, |_| ()).unwrap();
        }
        for method in ["a", "b", "c"] {
            assert!(t.call(method, |_| ()).unwrap_err().is_exhausted());
        }
    }

    #[test]
    fn test_repeatable_wraps() {
        let t = abc(true).track(());
        for _ in 0..5 {
            for method in ["a", "b", "c"] {
                t.call(method, |_| ()).unwrap();
            }
        }
    }

    // --- Independence ---

    #[test]
    fn test_disjoint_sequences_interleave() {
        let registry = SequenceRegistry::new(
            "T",
            [CallOrder::new(["a", "b", "c"]), CallOrder::new(["d", "e", "f"])],
        );
        let t = registry.track(());
        for method in ["a", "d", "e", "b"] {
            t.call(method, |_| ()).unwrap();
        }
    }

    #[test]
    fn test_instances_have_own_cursor() {
        let registry = abc(false);
        let x = registry.track(());
        let y = registry.track(());
        x.call("a", |_| ()).unwrap();
        x.call("b", |_| ()).unwrap();
        y.call("a", |_| ()).unwrap();
        x.call("c", |_| ()).unwrap();
        y.call("b", |_| ()).unwrap();
    }

    // --- Enable / disable / clean ---

    #[test]
    fn test_disable_bypasses_then_enable_resumes() {
        let registry = abc(false);
        let t = registry.track(());
        t.call("a", |_| ()).unwrap();

        t.disable_call_tracking(None).unwrap();
        for method in ["c", "c", "a", "b"] {
            t.call(method, |_| ()).unwrap();
        }

        t.enable_call_tracking(&["a", "b", "c"]).unwrap();
        t.call("b", |_| ()).unwrap();
        t.call("c", |_| ()).unwrap();
    }

    #[test]
    fn test_clean_twice_is_noop() {
        let registry = abc(false);
        let t = registry.track(());
        registry.clean(t.handle());
        registry.clean(t.handle());
        assert!(registry.trackers()[0].is_empty());
    }

    #[test]
    fn test_call_after_clean_is_unknown_instance() {
        let registry = abc(false);
        let t = registry.track(());
        registry.clean(t.handle());
        assert_eq!(
            t.call("a", |_| ()).unwrap_err(),
            CallOrderError::UnknownInstance(t.id())
        );
    }

    #[test]
    fn test_readd_resets_cursor() {
        let registry = abc(false);
        let t = registry.track(());
        t.call("a", |_| ()).unwrap();
        t.call("b", |_| ()).unwrap();

        registry.register(t.handle());
        t.call("a", |_| ()).unwrap();
    }
}
