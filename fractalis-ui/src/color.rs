use iced::Color;

pub const BLACK: Color = iced::Color::BLACK;
pub const TRANSPARENT: Color = iced::Color::TRANSPARENT;
pub const WHITE: Color = iced::Color::WHITE;

pub const SLATE_900: Color = Color::from_rgb(
    0x1E as f32 / 255.0,
    0x29 as f32 / 255.0,
    0x3B as f32 / 255.0,
);
pub const SLATE_600: Color = Color::from_rgb(
    0x47 as f32 / 255.0,
    0x55 as f32 / 255.0,
    0x69 as f32 / 255.0,
);
pub const SLATE_400: Color = Color::from_rgb(
    0x94 as f32 / 255.0,
    0xA3 as f32 / 255.0,
    0xB8 as f32 / 255.0,
);
pub const SLATE_200: Color = Color::from_rgb(
    0xE2 as f32 / 255.0,
    0xE8 as f32 / 255.0,
    0xF0 as f32 / 255.0,
);
pub const SLATE_100: Color = Color::from_rgb(
    0xF1 as f32 / 255.0,
    0xF5 as f32 / 255.0,
    0xF9 as f32 / 255.0,
);

pub const BLUE: Color = Color::from_rgb(
    0x25 as f32 / 255.0,
    0x63 as f32 / 255.0,
    0xEB as f32 / 255.0,
);
pub const DARK_BLUE: Color = Color::from_rgb(
    0x1D as f32 / 255.0,
    0x4E as f32 / 255.0,
    0xD8 as f32 / 255.0,
);
pub const LIGHT_BLUE: Color = Color::from_rgb(
    0xEF as f32 / 255.0,
    0xF6 as f32 / 255.0,
    0xFF as f32 / 255.0,
);

pub const GREEN: Color = Color::from_rgb(
    0x16 as f32 / 255.0,
    0xA3 as f32 / 255.0,
    0x4A as f32 / 255.0,
);
pub const DARK_GREEN: Color = Color::from_rgb(
    0x15 as f32 / 255.0,
    0x80 as f32 / 255.0,
    0x3D as f32 / 255.0,
);
pub const LIGHT_GREEN: Color = Color::from_rgb(
    0xF0 as f32 / 255.0,
    0xFD as f32 / 255.0,
    0xF4 as f32 / 255.0,
);

pub const ORANGE: Color = Color::from_rgb(
    0xD9 as f32 / 255.0,
    0x77 as f32 / 255.0,
    0x06 as f32 / 255.0,
);
pub const LIGHT_ORANGE: Color = Color::from_rgb(
    0xFE as f32 / 255.0,
    0xFC as f32 / 255.0,
    0xE8 as f32 / 255.0,
);

pub const RED: Color = Color::from_rgb(
    0xDC as f32 / 255.0,
    0x26 as f32 / 255.0,
    0x26 as f32 / 255.0,
);
pub const LIGHT_RED: Color = Color::from_rgb(
    0xFE as f32 / 255.0,
    0xF2 as f32 / 255.0,
    0xF2 as f32 / 255.0,
);
