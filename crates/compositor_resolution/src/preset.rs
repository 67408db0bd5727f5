// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cinema and print format tables.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Which preset table an ID belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetKind {
    /// Cinema and broadcast formats
    Cinema,
    /// Paper sizes
    Print,
}

/// An ID that names no preset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    /// Not a cinema format
    #[error("Unknown cinema format: {0}")]
    UnknownCinemaFormat(String),

    /// Not a print format
    #[error("Unknown print format: {0}")]
    UnknownPrintFormat(String),
}

/// Cinema and broadcast output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CinemaFormat {
    /// 2K DCI
    #[serde(rename = "2K_DCI")]
    Dci2k,
    /// 4K DCI
    #[serde(rename = "4K_DCI")]
    Dci4k,
    /// 8K DCI
    #[serde(rename = "8K_DCI")]
    Dci8k,
    /// HD
    #[serde(rename = "HD")]
    Hd,
    /// Full HD
    #[default]
    #[serde(rename = "FULL_HD")]
    FullHd,
    /// 2K (16:9)
    #[serde(rename = "2K")]
    Wide2k,
    /// 4K UHD
    #[serde(rename = "4K_UHD")]
    Uhd4k,
    /// 8K UHD
    #[serde(rename = "8K_UHD")]
    Uhd8k,
    /// Academy 2.39:1
    #[serde(rename = "ACADEMY_2_39_1")]
    Academy239,
    /// Cinemascope
    #[serde(rename = "CINEMASCOPE")]
    Cinemascope,
    /// IMAX
    #[serde(rename = "IMAX")]
    Imax,
}

/// Table row for a cinema format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CinemaPreset {
    /// Format this row describes
    pub format: CinemaFormat,
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate the format implies
    pub frame_rate: f32,
}

// Indexed by `CinemaFormat as usize`
#[rustfmt::skip]
static CINEMA_PRESETS: [CinemaPreset; 11] = [
    CinemaPreset { format: CinemaFormat::Dci2k, id: "2K_DCI", name: "2K DCI", width: 2048, height: 1080, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Dci4k, id: "4K_DCI", name: "4K DCI", width: 4096, height: 2160, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Dci8k, id: "8K_DCI", name: "8K DCI", width: 8192, height: 4320, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Hd, id: "HD", name: "HD", width: 1280, height: 720, frame_rate: 30.0 },
    CinemaPreset { format: CinemaFormat::FullHd, id: "FULL_HD", name: "Full HD", width: 1920, height: 1080, frame_rate: 30.0 },
    CinemaPreset { format: CinemaFormat::Wide2k, id: "2K", name: "2K", width: 2048, height: 1152, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Uhd4k, id: "4K_UHD", name: "4K UHD", width: 3840, height: 2160, frame_rate: 30.0 },
    CinemaPreset { format: CinemaFormat::Uhd8k, id: "8K_UHD", name: "8K UHD", width: 7680, height: 4320, frame_rate: 30.0 },
    CinemaPreset { format: CinemaFormat::Academy239, id: "ACADEMY_2_39_1", name: "Academy 2.39:1", width: 2048, height: 858, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Cinemascope, id: "CINEMASCOPE", name: "Cinemascope", width: 2048, height: 858, frame_rate: 24.0 },
    CinemaPreset { format: CinemaFormat::Imax, id: "IMAX", name: "IMAX", width: 4096, height: 3072, frame_rate: 24.0 },
];

impl CinemaFormat {
    /// Table row for this format
    pub fn preset(self) -> &'static CinemaPreset {
        &CINEMA_PRESETS[self as usize]
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        self.preset().id
    }

    /// Display name
    pub fn name(self) -> &'static str {
        self.preset().name
    }

    /// All formats in menu order
    pub fn all() -> impl Iterator<Item = CinemaFormat> {
        CINEMA_PRESETS.iter().map(|preset| preset.format)
    }
}

impl FromStr for CinemaFormat {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CINEMA_PRESETS
            .iter()
            .find(|preset| preset.id.eq_ignore_ascii_case(s))
            .map(|preset| preset.format)
            .ok_or_else(|| PresetError::UnknownCinemaFormat(s.to_string()))
    }
}

/// Paper sizes for print output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrintFormat {
    /// ISO A4
    #[default]
    A4,
    /// ISO A3
    A3,
    /// ISO A2
    A2,
    /// ISO A1
    A1,
    /// ISO A0
    A0,
    /// US Letter
    #[serde(rename = "LETTER")]
    Letter,
    /// US Legal
    #[serde(rename = "LEGAL")]
    Legal,
    /// US Tabloid
    #[serde(rename = "TABLOID")]
    Tabloid,
}

/// Table row for a paper size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintPreset {
    /// Format this row describes
    pub format: PrintFormat,
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Width in millimeters
    pub width_mm: f64,
    /// Height in millimeters
    pub height_mm: f64,
}

// Indexed by `PrintFormat as usize`
#[rustfmt::skip]
static PRINT_PRESETS: [PrintPreset; 8] = [
    PrintPreset { format: PrintFormat::A4, id: "A4", name: "A4", width_mm: 210.0, height_mm: 297.0 },
    PrintPreset { format: PrintFormat::A3, id: "A3", name: "A3", width_mm: 297.0, height_mm: 420.0 },
    PrintPreset { format: PrintFormat::A2, id: "A2", name: "A2", width_mm: 420.0, height_mm: 594.0 },
    PrintPreset { format: PrintFormat::A1, id: "A1", name: "A1", width_mm: 594.0, height_mm: 841.0 },
    PrintPreset { format: PrintFormat::A0, id: "A0", name: "A0", width_mm: 841.0, height_mm: 1189.0 },
    PrintPreset { format: PrintFormat::Letter, id: "LETTER", name: "Letter", width_mm: 216.0, height_mm: 279.0 },
    PrintPreset { format: PrintFormat::Legal, id: "LEGAL", name: "Legal", width_mm: 216.0, height_mm: 356.0 },
    PrintPreset { format: PrintFormat::Tabloid, id: "TABLOID", name: "Tabloid", width_mm: 279.0, height_mm: 432.0 },
];

impl PrintFormat {
    /// Table row for this format
    pub fn preset(self) -> &'static PrintPreset {
        &PRINT_PRESETS[self as usize]
    }

    /// Stable identifier
    pub fn id(self) -> &'static str {
        self.preset().id
    }

    /// Display name
    pub fn name(self) -> &'static str {
        self.preset().name
    }

    /// Pixel size at a print density
    pub fn pixels_at(self, dpi: u32) -> (u32, u32) {
        let preset = self.preset();
        (mm_to_pixels(preset.width_mm, dpi), mm_to_pixels(preset.height_mm, dpi))
    }

    /// All formats in menu order
    pub fn all() -> impl Iterator<Item = PrintFormat> {
        PRINT_PRESETS.iter().map(|preset| preset.format)
    }
}

impl FromStr for PrintFormat {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRINT_PRESETS
            .iter()
            .find(|preset| preset.id.eq_ignore_ascii_case(s))
            .map(|preset| preset.format)
            .ok_or_else(|| PresetError::UnknownPrintFormat(s.to_string()))
    }
}

/// Convert a print length to pixels, rounding to the nearest pixel
pub fn mm_to_pixels(mm: f64, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * f64::from(dpi)).round() as u32
}
