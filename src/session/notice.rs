use crate::auth::SegmentMatches;
use crate::touch::ProgressSink;

/// Full-screen messages shown between captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Hello,
    MainMenu,
    RegisterMenu,
    LoginMenu,
    Loading,
    EnterId,
    DrawPattern,
    Checking,
    Redirecting,
    DatabaseFull,
    IdExists,
    RegistrationSuccessful,
    RegistrationFailed,
    InvalidUserId,
    AccountLocked,
    LoginSuccessful,
    LoginWarning { segments: SegmentMatches },
    WrongPattern { attempts_left: u8 },
    ProfileMismatch,
}

impl Notice {
    /// Fixed text of the notice; `None` in the second line means a single
    /// centered line. `WrongPattern` carries its count separately.
    pub fn lines(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Hello => ("HELLO!", None),
            Self::MainMenu => ("4=REGISTER", Some("2=LOGIN")),
            Self::RegisterMenu => ("REGISTER MENU", None),
            Self::LoginMenu => ("LOGIN MENU", None),
            Self::Loading => ("LOADING...", None),
            Self::EnterId => ("PLEASE ENTER", Some("ID")),
            Self::DrawPattern => ("DRAW YOUR", Some("PATTERN")),
            Self::Checking => ("CHECKING...", None),
            Self::Redirecting => ("REDIRECTING...", None),
            Self::DatabaseFull => ("DATABASE", Some("FULL!")),
            Self::IdExists => ("ID ALREADY", Some("EXISTS!")),
            Self::RegistrationSuccessful => ("REGISTRATION", Some("SUCCESSFUL!")),
            Self::RegistrationFailed => ("REGISTRATION", Some("FAILED!")),
            Self::InvalidUserId => ("INVALID", Some("USER ID!")),
            Self::AccountLocked => ("ACCOUNT", Some("LOCKED!")),
            Self::LoginSuccessful => ("LOGIN", Some("SUCCESSFUL!")),
            Self::LoginWarning { .. } => ("LOGIN OK", Some("TIMING WARNING")),
            Self::WrongPattern { .. } => ("WRONG PATTERN!", Some("ATTEMPTS LEFT")),
            Self::ProfileMismatch => ("PROFILE", Some("MISMATCH!")),
        }
    }
}

/// Output side of the device: notices plus capture progress.
pub trait AuthScreen: ProgressSink {
    fn notice(&mut self, notice: &Notice);
}

impl<T: AuthScreen + ?Sized> AuthScreen for &mut T {
    fn notice(&mut self, notice: &Notice) {
        (**self).notice(notice);
    }
}

/// Screen that only logs, for headless builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogScreen;

impl ProgressSink for LogScreen {
    fn digits(&mut self, prompt: &str, entered: &[u8]) {
        log::info!("screen: {}: {} digit(s)", prompt, entered.len());
    }

    fn pattern(&mut self, entered: &[crate::touch::Channel]) {
        log::info!("screen: pattern {} element(s)", entered.len());
    }
}

impl AuthScreen for LogScreen {
    fn notice(&mut self, notice: &Notice) {
        let (first, second) = notice.lines();
        match notice {
            Notice::WrongPattern { attempts_left } => {
                log::info!("screen: {} | {} {}", first, attempts_left, second.unwrap_or(""));
            }
            _ => log::info!("screen: {} | {}", first, second.unwrap_or("")),
        }
    }
}
