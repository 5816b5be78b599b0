use crate::color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub general: General,
    pub text: Text,
    pub buttons: Buttons,
    pub cards: Cards,
    pub notifications: Notifications,
    pub text_inputs: TextInputs,
    pub checkboxes: Checkboxes,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct General {
    pub background: iced::Color,
    pub header: iced::Color,
    pub scrollable: iced::Color,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Text {
    pub primary: iced::Color,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Buttons {
    pub primary: Button,
    pub secondary: Button,
    pub success: Button,
    pub transparent: Button,
    pub tile: Button,
    pub choice: Button,
    pub choice_selected: Button,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Button {
    pub active: ButtonPalette,
    pub hovered: ButtonPalette,
    pub pressed: Option<ButtonPalette>,
    pub disabled: Option<ButtonPalette>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonPalette {
    pub background: iced::Color,
    pub text: iced::Color,
    pub border: Option<iced::Color>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContainerPalette {
    pub background: iced::Color,
    pub text: Option<iced::Color>,
    pub border: Option<iced::Color>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cards {
    pub simple: ContainerPalette,
    pub highlighted: ContainerPalette,
    pub info: ContainerPalette,
    pub success: ContainerPalette,
    pub warning: ContainerPalette,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Notifications {
    pub pending: ContainerPalette,
    pub success: ContainerPalette,
    pub error: ContainerPalette,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextInputs {
    pub primary: TextInput,
    pub invalid: TextInput,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextInput {
    pub active: TextInputPalette,
    pub focused: TextInputPalette,
    pub disabled: TextInputPalette,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextInputPalette {
    pub background: iced::Color,
    pub icon: iced::Color,
    pub placeholder: iced::Color,
    pub value: iced::Color,
    pub selection: iced::Color,
    pub border: Option<iced::Color>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Checkboxes {
    pub icon: iced::Color,
    pub text: iced::Color,
    pub background: iced::Color,
    pub checked_background: iced::Color,
    pub border: Option<iced::Color>,
}

const fn flat(background: iced::Color, text: iced::Color, border: Option<iced::Color>) -> ButtonPalette {
    ButtonPalette {
        background,
        text,
        border,
    }
}

const fn input(border: iced::Color) -> TextInputPalette {
    TextInputPalette {
        background: color::WHITE,
        icon: color::SLATE_400,
        placeholder: color::SLATE_400,
        value: color::SLATE_900,
        selection: color::LIGHT_BLUE,
        border: Some(border),
    }
}

impl std::default::Default for Palette {
    fn default() -> Self {
        Self {
            general: General {
                background: color::SLATE_100,
                header: color::WHITE,
                scrollable: color::SLATE_400,
            },
            text: Text {
                primary: color::SLATE_900,
            },
            buttons: Buttons {
                primary: Button {
                    active: flat(color::BLUE, color::WHITE, None),
                    hovered: flat(color::DARK_BLUE, color::WHITE, None),
                    pressed: Some(flat(color::DARK_BLUE, color::WHITE, None)),
                    disabled: Some(flat(color::SLATE_200, color::SLATE_600, None)),
                },
                secondary: Button {
                    active: flat(color::WHITE, color::SLATE_900, Some(color::SLATE_200)),
                    hovered: flat(color::SLATE_100, color::SLATE_900, Some(color::SLATE_400)),
                    pressed: Some(flat(color::SLATE_200, color::SLATE_900, Some(color::SLATE_400))),
                    disabled: Some(flat(color::WHITE, color::SLATE_400, Some(color::SLATE_200))),
                },
                success: Button {
                    active: flat(color::GREEN, color::WHITE, None),
                    hovered: flat(color::DARK_GREEN, color::WHITE, None),
                    pressed: Some(flat(color::DARK_GREEN, color::WHITE, None)),
                    disabled: Some(flat(color::SLATE_200, color::SLATE_600, None)),
                },
                transparent: Button {
                    active: flat(color::TRANSPARENT, color::BLUE, None),
                    hovered: flat(color::TRANSPARENT, color::DARK_BLUE, None),
                    pressed: None,
                    disabled: Some(flat(color::TRANSPARENT, color::SLATE_400, None)),
                },
                tile: Button {
                    active: flat(color::WHITE, color::SLATE_900, Some(color::SLATE_200)),
                    hovered: flat(color::WHITE, color::SLATE_900, Some(color::BLUE)),
                    pressed: Some(flat(color::LIGHT_BLUE, color::SLATE_900, Some(color::BLUE))),
                    disabled: None,
                },
                choice: Button {
                    active: flat(color::WHITE, color::SLATE_600, Some(color::SLATE_200)),
                    hovered: flat(color::WHITE, color::SLATE_900, Some(color::SLATE_400)),
                    pressed: None,
                    disabled: None,
                },
                choice_selected: Button {
                    active: flat(color::LIGHT_BLUE, color::DARK_BLUE, Some(color::BLUE)),
                    hovered: flat(color::LIGHT_BLUE, color::DARK_BLUE, Some(color::BLUE)),
                    pressed: None,
                    disabled: None,
                },
            },
            cards: Cards {
                simple: ContainerPalette {
                    background: color::WHITE,
                    text: None,
                    border: Some(color::SLATE_200),
                },
                highlighted: ContainerPalette {
                    background: color::WHITE,
                    text: None,
                    border: Some(color::BLUE),
                },
                info: ContainerPalette {
                    background: color::LIGHT_BLUE,
                    text: Some(color::DARK_BLUE),
                    border: Some(color::LIGHT_BLUE),
                },
                success: ContainerPalette {
                    background: color::LIGHT_GREEN,
                    text: Some(color::DARK_GREEN),
                    border: Some(color::LIGHT_GREEN),
                },
                warning: ContainerPalette {
                    background: color::LIGHT_ORANGE,
                    text: Some(color::ORANGE),
                    border: Some(color::LIGHT_ORANGE),
                },
            },
            notifications: Notifications {
                pending: ContainerPalette {
                    background: color::LIGHT_BLUE,
                    text: Some(color::DARK_BLUE),
                    border: Some(color::BLUE),
                },
                success: ContainerPalette {
                    background: color::LIGHT_GREEN,
                    text: Some(color::DARK_GREEN),
                    border: Some(color::GREEN),
                },
                error: ContainerPalette {
                    background: color::LIGHT_RED,
                    text: Some(color::RED),
                    border: Some(color::RED),
                },
            },
            text_inputs: TextInputs {
                primary: TextInput {
                    active: input(color::SLATE_200),
                    focused: input(color::BLUE),
                    disabled: TextInputPalette {
                        background: color::SLATE_100,
                        ..input(color::SLATE_200)
                    },
                },
                invalid: TextInput {
                    active: input(color::RED),
                    focused: input(color::RED),
                    disabled: input(color::RED),
                },
            },
            checkboxes: Checkboxes {
                icon: color::WHITE,
                text: color::SLATE_600,
                background: color::WHITE,
                checked_background: color::BLUE,
                border: Some(color::SLATE_400),
            },
        }
    }
}
