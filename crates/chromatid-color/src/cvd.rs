// ABOUTME: Color vision deficiency simulation in linear sRGB
// ABOUTME: Machado (2009) full-severity matrices for dichromacy, luminance for achromatopsia

use chromatid_types::{CvdType, HexColor};

use crate::space::Rgb;

type Matrix3 = [[f64; 3]; 3];

const PROTANOPIA: Matrix3 = [
    [0.152286, 1.052583, -0.204868],
    [0.114503, 0.786281, 0.099216],
    [-0.003882, -0.048116, 1.051998],
];

const DEUTERANOPIA: Matrix3 = [
    [0.367322, 0.860646, -0.227968],
    [0.280085, 0.672501, 0.047413],
    [-0.011820, 0.042940, 0.968881],
];

const TRITANOPIA: Matrix3 = [
    [1.255528, -0.076749, -0.178779],
    [-0.078411, 0.930809, 0.147602],
    [0.004733, 0.691367, 0.303900],
];

fn apply(matrix: &Matrix3, [r, g, b]: [f64; 3]) -> [f64; 3] {
    matrix.map(|row| row[0] * r + row[1] * g + row[2] * b)
}

/// Simulate how `color` appears under the given deficiency.
///
/// The result is clamped to gamut and quantized, so simulating the same hex
/// always yields the same hex.
pub fn simulate(color: &HexColor, cvd: CvdType) -> HexColor {
    let linear = Rgb::from_hex(color).to_linear();

    let simulated = match cvd {
        CvdType::Protanopia => apply(&PROTANOPIA, linear),
        CvdType::Deuteranopia => apply(&DEUTERANOPIA, linear),
        CvdType::Tritanopia => apply(&TRITANOPIA, linear),
        CvdType::Achromatopsia => {
            let y = 0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2];
            [y, y, y]
        }
    };

    Rgb::from_linear(simulated).to_hex()
}
