use callorder_rs::{
    CallOrder, CallOrderError, CallOrdered, SequenceRegistry, Tracked, TrackedMethod,
};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ContextOp {
    Init,
    Deploy,
    SetupContext,
    Undeploy,
}

impl TrackedMethod for ContextOp {
    fn name(&self) -> &str {
        match self {
            ContextOp::Init => "init",
            ContextOp::Deploy => "deploy",
            ContextOp::SetupContext => "setup_context",
            ContextOp::Undeploy => "undeploy",
        }
    }
}

#[derive(Debug, Default)]
struct ContextState {
    name: String,
    deployed: bool,
    configured: bool,
}

impl CallOrdered for ContextState {
    type Method = ContextOp;

    fn call_orders() -> Vec<CallOrder<ContextOp>> {
        vec![CallOrder::new([
            ContextOp::Init,
            ContextOp::Deploy,
            ContextOp::SetupContext,
            ContextOp::Undeploy,
        ])]
    }
}

fn registry() -> &'static Arc<SequenceRegistry<ContextOp>> {
    static REGISTRY: OnceLock<Arc<SequenceRegistry<ContextOp>>> = OnceLock::new();
    REGISTRY.get_or_init(SequenceRegistry::declare::<ContextState>)
}

/// A standalone benchmark context whose lifecycle is enforced.
struct StandaloneContext {
    inner: Tracked<ContextState, ContextOp>,
}

impl StandaloneContext {
    fn new() -> Self {
        Self {
            inner: registry().track(ContextState::default()),
        }
    }

    fn init(&mut self, name: &str) -> Result<(), CallOrderError> {
        self.inner.call_mut(ContextOp::Init, |s| s.name = name.to_string())
    }

    fn deploy(&mut self) -> Result<(), CallOrderError> {
        self.inner.call_mut(ContextOp::Deploy, |s| s.deployed = true)
    }

    fn setup_context(&mut self) -> Result<(), CallOrderError> {
        self.inner.call_mut(ContextOp::SetupContext, |s| s.configured = true)
    }

    fn undeploy(&mut self) -> Result<(), CallOrderError> {
        self.inner.call_mut(ContextOp::Undeploy, |s| {
            s.deployed = false;
            s.configured = false;
        })
    }

    fn state(&self) -> &ContextState {
        self.inner.get_untracked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut context = StandaloneContext::new();
        context.init("ctx").unwrap();
        context.deploy().unwrap();
        context.setup_context().unwrap();
        assert!(context.state().deployed);
        assert!(context.state().configured);
        context.undeploy().unwrap();
        assert!(!context.state().deployed);
        assert_eq!(context.state().name, "ctx");
    }

    #[test]
    fn test_deploy_before_init_is_rejected() {
        let mut context = StandaloneContext::new();
        let err = context.deploy().unwrap_err();
        assert_eq!(
            err,
            CallOrderError::OutOfOrder {
                found: "deploy".to_string(),
                expected: "init".to_string(),
            }
        );
        assert!(!context.state().deployed);

        context.init("ctx").unwrap();
        context.deploy().unwrap();
    }

    #[test]
    fn test_context_cannot_be_redeployed() {
        let mut context = StandaloneContext::new();
        context.init("ctx").unwrap();
        context.deploy().unwrap();
        context.setup_context().unwrap();
        context.undeploy().unwrap();

        assert!(context.init("again").unwrap_err().is_exhausted());
        assert!(context.deploy().unwrap_err().is_exhausted());
    }

    #[test]
    fn test_disabled_tracking_for_teardown_only_runs() {
        let mut context = StandaloneContext::new();
        context.inner.disable_call_tracking(None).unwrap();
        context.undeploy().unwrap();
        context.undeploy().unwrap();
    }
}
