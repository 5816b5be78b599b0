pub mod car;
pub mod claims;
pub mod complaints;
pub mod contact;
pub mod dashboard;
pub mod education;
pub mod forgot_password;
pub mod login;
pub mod otp;
pub mod register;

use iced::{alignment::Horizontal, widget::text_editor, Length};

use fractalis::{
    attachment::{Attachment, AttachmentError, ALLOWED_EXTENSIONS},
    catalog::Destination,
    contact::ProductLine,
    validation::Violation,
    SessionService, BRAND_FULL,
};
use fractalis_ui::{
    color,
    component::{self, button, form, text},
    theme,
    widget::{Column, Container, Element, Row, Scrollable},
};

/// Where a screen asks the router to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    Car,
    Education,
    Contact(ProductLine),
    Claims,
    Complaints,
    /// Clears the session, then shows the login screen.
    Logout,
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::CarInsurance => Self::Car,
            Destination::Contact(line) => Self::Contact(line),
            Destination::EducationInsurance => Self::Education,
            Destination::Claims => Self::Claims,
            Destination::Complaints => Self::Complaints,
        }
    }
}

/// Services shared by every screen.
#[derive(Debug, Clone)]
pub struct Context {
    pub session: SessionService,
    pub contact_phone: String,
}

/// Page header of the screens reached once logged in.
///
/// The profile of the connected user is only shown along with a `logout` message.
pub fn header<'a, M: Clone + 'a>(
    ctx: &Context,
    title: &'a str,
    back: Option<M>,
    logout: Option<M>,
) -> Element<'a, M> {
    component::header(title, BRAND_FULL, back, account(ctx, logout)).into()
}

/// Name and phone of the connected user, only when the screen offers to log out.
fn account<M>(ctx: &Context, logout: Option<M>) -> Option<(String, String, M)> {
    let logout = logout?;
    ctx.session
        .current()
        .map(|identity| (identity.display_name(), identity.telephone, logout))
}

/// Header on top, the content centered in a scrollable column below.
pub fn layout<'a, M: 'a>(
    header: Element<'a, M>,
    content: impl Into<Element<'a, M>>,
) -> Element<'a, M> {
    Column::new()
        .push(header)
        .push(
            Scrollable::new(
                Container::new(
                    Column::new()
                        .push(content)
                        .max_width(900)
                        .padding([30, 20]),
                )
                .width(Length::Fill)
                .align_x(Horizontal::Center),
            )
            .height(Length::Fill),
        )
        .into()
}

/// Centered card used by the authentication screens.
pub fn auth_layout<'a, M: 'a>(content: impl Into<Element<'a, M>>) -> Element<'a, M> {
    Container::new(
        Scrollable::new(
            Container::new(
                component::card::simple(Column::new().push(content).max_width(450))
                    .padding(30),
            )
            .width(Length::Fill)
            .padding(40)
            .align_x(Horizontal::Center),
        )
        .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

/// Text input of a form whose rules are checked by `violations`.
///
/// An empty value is never flagged, the step buttons already account for it.
pub fn text_field<'a, M: Clone + 'static>(
    violations: &[Violation],
    name: &str,
    label: &'a str,
    placeholder: &'a str,
    value: &str,
    warning: &'a str,
    on_change: fn(String) -> M,
) -> Element<'a, M> {
    let valid = value.is_empty() || !violations.iter().any(|v| v.field == name);
    form::Form::new(
        placeholder,
        &form::Value {
            value: value.to_string(),
            valid,
        },
        on_change,
    )
    .label(label)
    .warning(warning)
    .into()
}

/// Multi-line input, read back with [`editor_text`].
pub fn text_area<'a, M: Clone + 'a>(
    label: &'a str,
    placeholder: &'a str,
    content: &'a text_editor::Content,
    valid: bool,
    on_action: fn(text_editor::Action) -> M,
) -> Element<'a, M> {
    Column::new()
        .spacing(5)
        .push(text::p2_medium(label).color(color::SLATE_600))
        .push(
            text_editor(content)
                .placeholder(placeholder)
                .on_action(on_action)
                .padding(10)
                .height(Length::Fixed(150.0))
                .style(if valid {
                    theme::text_editor::primary
                } else {
                    theme::text_editor::invalid
                }),
        )
        .into()
}

/// Text of the editor without the line break it always ends with.
pub fn editor_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Grid of mutually exclusive options, `per_row` on each line.
pub fn choices<'a, M: Clone + 'a, T: Copy + PartialEq>(
    items: &[T],
    selected: Option<T>,
    per_row: usize,
    content: impl Fn(T) -> Element<'a, M>,
    on_select: impl Fn(T) -> M,
) -> Column<'a, M> {
    items
        .chunks(per_row)
        .fold(Column::new().spacing(10), |col, chunk| {
            col.push(chunk.iter().fold(Row::new().spacing(10), |row, item| {
                row.push(
                    button::choice(content(*item), selected == Some(*item))
                        .width(Length::FillPortion(1))
                        .on_press(on_select(*item)),
                )
            }))
        })
}

/// Picker button of a document with the name of the file once attached.
pub fn attachment_field<'a, M: Clone + 'a>(
    label: &'a str,
    attachment: Option<&'a Attachment>,
    error: Option<&'a str>,
    on_pick: Option<M>,
) -> Element<'a, M> {
    Column::new()
        .spacing(5)
        .push(text::p2_medium(label).color(color::SLATE_600))
        .push(
            Row::new()
                .spacing(10)
                .align_y(iced::Alignment::Center)
                .push(
                    button::secondary(
                        None,
                        if attachment.is_some() {
                            "Changer le fichier"
                        } else {
                            "Cliquez pour télécharger"
                        },
                    )
                    .width(Length::Fixed(220.0))
                    .on_press_maybe(on_pick),
                )
                .push(match attachment {
                    Some(a) => text::p2_medium(format!("✓ {}", a.file_name())).color(color::GREEN),
                    None => text::caption("Formats acceptés: JPG, PNG (Max: 5MB)")
                        .color(color::SLATE_600),
                }),
        )
        .push_maybe(error.map(|e| text::caption(e).color(color::RED)))
        .into()
}

/// Opens the system file dialog, `Ok(None)` if the user cancelled it.
pub async fn pick_attachment(title: &'static str) -> Result<Option<Attachment>, AttachmentError> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title(title)
        .add_filter("Images", ALLOWED_EXTENSIONS)
        .pick_file()
        .await
    else {
        return Ok(None);
    };
    Attachment::from_path(handle.path()).map(Some)
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    use fractalis::{latency::Latency, storage::MemoryStorage};
    Context {
        session: SessionService::init(
            std::sync::Arc::new(MemoryStorage::default()),
            Latency::none(),
        ),
        contact_phone: fractalis::contact::DEFAULT_AGENCY_PHONE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn profile_is_shown_with_logout_only() {
        let ctx = test_context();
        assert_eq!(account(&ctx, Some(())), None);

        ctx.session.login("0700000000", "secret").await.unwrap();
        assert_eq!(account::<()>(&ctx, None), None);
        let (_, phone, _) = account(&ctx, Some(())).unwrap();
        assert_eq!(phone, "0700000000");
    }
}
