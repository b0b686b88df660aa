use questline_flow::FlowEvent;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum MockOp {
    /// Check the entered code against the mock OTP.
    VerifyOtp { code: String },
    /// Pretend to persist the new password.
    ResetPassword,
    /// Move the challenge wizard to its next step.
    AdvanceWizard,
    /// Publish the drafted challenge.
    PublishChallenge,
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum AppEvent {
    /// A screen finished or abandoned; feed the navigation machine.
    Flow(FlowEvent),

    /// A screen kicked off a simulated backend call. The app layer picks
    /// the delay and schedules the completion.
    StartMockOp(MockOp),

    /// A simulated backend call resolved. `epoch` identifies the screen
    /// generation that scheduled the op; a resolution arriving after the
    /// user navigated away is dropped.
    MockOpFinished { op: MockOp, epoch: u64 },

    /// Start the banner auto-advance ticker (dashboard entered).
    StartCarouselAnimation,

    /// Stop the banner auto-advance ticker (dashboard left).
    StopCarouselAnimation,

    /// One carousel interval elapsed.
    CarouselTick,

    /// Request to exit the application gracefully.
    ExitRequest,
}
