pub const OTP_LENGTH: usize = 6;
pub const RESEND_COOLDOWN_SECS: u32 = 30;

/// What the view has to do after an edit of the cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Cell that must receive the keyboard focus.
    pub focus: Option<usize>,
    /// Code to verify, set once when the last empty cell gets filled.
    pub submit: Option<String>,
}

/// Resend cooldown, ticked once per second by the view while it is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    cancelled: bool,
}

impl Countdown {
    pub fn start(secs: u32) -> Self {
        Self {
            remaining: secs,
            cancelled: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// The view keeps its timer subscription alive only while this is true.
    pub fn is_running(&self) -> bool {
        !self.cancelled && self.remaining > 0
    }

    /// Returns true if the tick was applied.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn restart(&mut self, secs: u32) {
        self.remaining = secs;
        self.cancelled = false;
    }
}

/// Six single digit cells with focus tracking, auto-submit and a resend cooldown.
#[derive(Debug, Clone)]
pub struct OtpInput {
    cells: [String; OTP_LENGTH],
    focused: usize,
    countdown: Countdown,
}

impl Default for OtpInput {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpInput {
    pub fn new() -> Self {
        Self {
            cells: Default::default(),
            focused: 0,
            countdown: Countdown::start(RESEND_COOLDOWN_SECS),
        }
    }

    pub fn cells(&self) -> &[String; OTP_LENGTH] {
        &self.cells
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn code(&self) -> String {
        self.cells.concat()
    }

    /// Manual verification is offered only once every cell holds a digit.
    pub fn verify_enabled(&self) -> bool {
        self.is_complete()
    }

    pub fn resend_enabled(&self) -> bool {
        self.countdown.is_finished()
    }

    /// Applies the new content of cell `index` as reported by its text input.
    ///
    /// Only the last digit typed is kept. An empty value on an already empty
    /// cell is a backspace and moves the focus back.
    pub fn input(&mut self, index: usize, value: &str) -> Outcome {
        if index >= OTP_LENGTH {
            return Outcome::default();
        }
        self.focused = index;

        if value.is_empty() {
            if self.cells[index].is_empty() {
                return self.backspace(index);
            }
            self.cells[index].clear();
            return Outcome::default();
        }

        let Some(digit) = value.chars().filter(|c| c.is_ascii_digit()).last() else {
            return Outcome::default();
        };

        let was_complete = self.is_complete();
        self.cells[index] = digit.to_string();

        let mut outcome = Outcome::default();
        if index < OTP_LENGTH - 1 {
            self.focused = index + 1;
            outcome.focus = Some(self.focused);
        }
        if !was_complete && self.is_complete() {
            outcome.submit = Some(self.code());
        }
        outcome
    }

    /// Backspace pressed on cell `index`.
    pub fn backspace(&mut self, index: usize) -> Outcome {
        if index >= OTP_LENGTH {
            return Outcome::default();
        }
        if !self.cells[index].is_empty() {
            self.cells[index].clear();
            self.focused = index;
            return Outcome::default();
        }
        if index > 0 {
            self.focused = index - 1;
            return Outcome {
                focus: Some(self.focused),
                submit: None,
            };
        }
        Outcome::default()
    }

    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    /// Clears the cells and re-arms the cooldown. Returns false while the
    /// cooldown is still running, in which case nothing changes and the code must
    /// not be sent again.
    pub fn resend(&mut self) -> bool {
        if !self.resend_enabled() {
            return false;
        }
        self.cells = Default::default();
        self.focused = 0;
        self.countdown.restart(RESEND_COOLDOWN_SECS);
        true
    }

    /// Stops the cooldown when the widget is torn down.
    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(otp: &mut OtpInput, digits: &str) -> Vec<String> {
        digits
            .chars()
            .enumerate()
            .filter_map(|(i, c)| otp.input(i, &c.to_string()).submit)
            .collect()
    }

    #[test]
    fn six_digits_submit_once() {
        let mut otp = OtpInput::new();
        let submitted = type_digits(&mut otp, "123456");
        assert_eq!(submitted, vec!["123456".to_string()]);
        assert!(otp.verify_enabled());

        for digits in ["000000", "987654", "111111"] {
            let mut otp = OtpInput::new();
            assert_eq!(type_digits(&mut otp, digits), vec![digits.to_string()]);
        }
    }

    #[test]
    fn focus_moves_forward_and_back() {
        let mut otp = OtpInput::new();
        assert_eq!(otp.input(0, "1").focus, Some(1));
        assert_eq!(otp.input(4, "5").focus, Some(5));
        assert_eq!(otp.input(5, "6").focus, None);
        assert_eq!(otp.focused(), 5);

        // Cell 3 is empty: backspace goes to cell 2.
        assert_eq!(otp.input(3, "").focus, Some(2));
        assert_eq!(otp.backspace(0).focus, None);

        // Clearing a filled cell keeps the focus there.
        assert_eq!(otp.input(4, ""), Outcome::default());
        assert!(otp.cells()[4].is_empty());
        assert_eq!(otp.focused(), 4);
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut otp = OtpInput::new();
        assert_eq!(otp.input(0, "a"), Outcome::default());
        assert!(otp.cells()[0].is_empty());
        otp.input(0, "12");
        assert_eq!(otp.cells()[0], "2");
        otp.input(0, "2x9");
        assert_eq!(otp.cells()[0], "9");
    }

    #[test]
    fn five_digits_and_backspace_never_submit() {
        let mut otp = OtpInput::new();
        assert!(type_digits(&mut otp, "12345").is_empty());
        assert!(!otp.verify_enabled());
        assert_eq!(otp.backspace(5), Outcome { focus: Some(4), submit: None });
        assert_eq!(otp.backspace(4), Outcome::default());
        assert_eq!(otp.input(3, ""), Outcome::default());
        assert!(!otp.is_complete());
    }

    #[test]
    fn edits_after_submit_do_not_resubmit() {
        let mut otp = OtpInput::new();
        assert_eq!(type_digits(&mut otp, "123456").len(), 1);

        // Overwriting a digit keeps the code complete: no second submission.
        assert_eq!(otp.input(2, "9").submit, None);
        assert_eq!(otp.code(), "129456");

        // Emptying then filling again completes the code a second time.
        otp.input(5, "");
        assert!(!otp.is_complete());
        assert_eq!(otp.input(5, "7").submit, Some("129457".to_string()));
    }

    #[test]
    fn resend_waits_for_cooldown() {
        let mut otp = OtpInput::new();
        type_digits(&mut otp, "12");
        assert!(!otp.resend());
        assert_eq!(otp.code(), "12");

        for _ in 0..RESEND_COOLDOWN_SECS {
            assert!(otp.tick());
        }
        assert!(!otp.tick());
        assert!(otp.resend_enabled());
        assert!(otp.resend());
        assert_eq!(otp.code(), "");
        assert_eq!(otp.focused(), 0);
        assert_eq!(otp.countdown().remaining(), RESEND_COOLDOWN_SECS);
    }

    #[test]
    fn cancelled_countdown_ignores_ticks() {
        let mut otp = OtpInput::new();
        otp.tick();
        otp.cancel();
        assert!(!otp.countdown().is_running());
        assert!(!otp.tick());
        assert_eq!(otp.countdown().remaining(), RESEND_COOLDOWN_SECS - 1);
    }
}
