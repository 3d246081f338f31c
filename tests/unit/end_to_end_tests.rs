use callorder_rs::{CallOrder, CallOrderError, CallOrdered, SequenceRegistry, TrackedMethod};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Func {
        F1,
        F2,
        F3,
        F4,
        F5,
        F6,
    }

    impl TrackedMethod for Func {
        fn name(&self) -> &str {
            match self {
                Func::F1 => "f1",
                Func::F2 => "f2",
                Func::F3 => "f3",
                Func::F4 => "f4",
                Func::F5 => "f5",
                Func::F6 => "f6",
            }
        }
    }

    /// S1 is repeatable, S2 allows a single pass.
    struct Scenario {
        calls: Vec<Func>,
    }

    impl Scenario {
        fn record(&mut self, func: Func) {
            self.calls.push(func);
        }
    }

    impl CallOrdered for Scenario {
        type Method = Func;

        fn call_orders() -> Vec<CallOrder<Func>> {
            vec![
                CallOrder::new([Func::F1, Func::F2, Func::F3]).repeatable(true),
                CallOrder::new([Func::F4, Func::F5, Func::F6]),
            ]
        }
    }

    fn out_of_order(found: &str, expected: &str) -> CallOrderError {
        CallOrderError::OutOfOrder {
            found: found.to_string(),
            expected: expected.to_string(),
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let registry = SequenceRegistry::declare::<Scenario>();
        let mut x = registry.track(Scenario { calls: Vec::new() });

        for func in [Func::F1, Func::F4, Func::F5, Func::F2] {
            x.call_mut(func, |t| t.record(func)).unwrap();
        }

        // f2 again while f3 is expected
        assert_eq!(
            x.call_mut(Func::F2, |t| t.record(Func::F2)).unwrap_err(),
            out_of_order("f2", "f3")
        );
        assert_eq!(
            x.call_mut(Func::F1, |t| t.record(Func::F1)).unwrap_err(),
            out_of_order("f1", "f3")
        );

        // retry of the pending expectation, then a new cycle of S1
        x.call_mut(Func::F3, |t| t.record(Func::F3)).unwrap();
        x.call_mut(Func::F1, |t| t.record(Func::F1)).unwrap();

        // completes S2
        x.call_mut(Func::F6, |t| t.record(Func::F6)).unwrap();

        let err = x.call_mut(Func::F4, |t| t.record(Func::F4)).unwrap_err();
        assert_eq!(err, CallOrderError::Exhausted(x.id()));

        assert_eq!(
            x.get_untracked().calls,
            vec![
                Func::F1,
                Func::F4,
                Func::F5,
                Func::F2,
                Func::F3,
                Func::F1,
                Func::F6
            ]
        );
    }

    #[test]
    fn test_declared_registry_is_named_after_type() {
        let registry = SequenceRegistry::declare::<Scenario>();
        assert!(registry.target().ends_with("Scenario"));
        assert_eq!(registry.trackers().len(), 2);
        assert!(registry.trackers()[0].is_repeatable());
        assert!(!registry.trackers()[1].is_repeatable());
    }

    #[test]
    fn test_second_instance_starts_fresh() {
        let registry = SequenceRegistry::declare::<Scenario>();
        let mut x = registry.track(Scenario { calls: Vec::new() });
        for func in [Func::F4, Func::F5, Func::F6] {
            x.call_mut(func, |t| t.record(func)).unwrap();
        }
        assert!(x.call(Func::F4, |_| ()).unwrap_err().is_exhausted());

        let y = registry.track(Scenario { calls: Vec::new() });
        y.call(Func::F4, |_| ()).unwrap();
    }
}
