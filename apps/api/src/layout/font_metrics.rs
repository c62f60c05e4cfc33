//! Static width tables for the PDF standard fonts the renderer uses.
//!
//! Widths come from the Adobe Core 14 AFM files, divided by 1000 so they are in
//! em units (multiply by the font size for points). Helvetica-Oblique shares the
//! upright Helvetica widths.
//!
//! Tables cover ASCII 0x20..=0x7E. Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [
        FontFace::Helvetica,
        FontFace::HelveticaBold,
        FontFace::HelveticaOblique,
    ];

    /// PostScript name used as the PDF `BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
            FontFace::HelveticaOblique => "F3",
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            FontFace::Helvetica | FontFace::HelveticaOblique => &HELVETICA_TABLE,
            FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Character-width table for one face, in em units.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Rendered width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '•' => 0.350,
            '–' => 0.556,
            '—' | '…' => 1.000,
            '‘' | '’' => 0.222,
            '“' | '”' => 0.333,
            '\u{a0}' => self.space_width,
            _ => self.average_char_width,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        let helvetica = FontFace::Helvetica.metrics();
        // "Hi" = H(722) + i(222)
        assert!((helvetica.measure_str("Hi") - 0.944).abs() < 1e-4);
        assert!((helvetica.measure_pt("Hi", 10.0) - 9.44).abs() < 1e-3);

        let bold = FontFace::HelveticaBold.metrics();
        assert!(bold.measure_str("Hi") > helvetica.measure_str("Hi"));
    }

    #[test]
    fn test_oblique_shares_upright_widths() {
        let text = "Senior Engineer, 2019 - 2023";
        assert_eq!(
            FontFace::Helvetica.metrics().measure_str(text),
            FontFace::HelveticaOblique.metrics().measure_str(text)
        );
    }

    #[test]
    fn test_non_ascii_falls_back() {
        let helvetica = FontFace::Helvetica.metrics();
        assert!((helvetica.measure_str("•") - 0.350).abs() < 1e-4);
        assert_eq!(helvetica.measure_str("日"), helvetica.average_char_width);
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let mut names: Vec<&str> = FontFace::ALL.iter().map(|f| f.resource_name()).collect();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
