use anyhow::{bail, ensure, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Image {
    pixels: Vec<bool>,
    width: usize,
    height: usize,
    /// State of every pixel outside the stored window.
    background: bool,
}

fn parse_pixels(line: &str) -> Result<Vec<bool>> {
    line.bytes()
        .map(|b| match b {
            b'#' => Ok(true),
            b'.' => Ok(false),
            _ => bail!("invalid pixel {:?}", b as char),
        })
        .collect()
}

fn parse(input: &str) -> Result<([bool; 512], Image)> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let lut = parse_pixels(lines.next().context("missing enhancement algorithm")?)?;
    let lut: Result<[bool; 512], _> = lut.try_into();
    let lut = lut
        .ok()
        .context("enhancement algorithm must have 512 entries")?;

    let mut pixels = Vec::new();
    let mut width = None;
    let mut height = 0;
    for line in lines {
        ensure!(
            *width.get_or_insert(line.len()) == line.len(),
            "ragged input image"
        );
        pixels.extend(parse_pixels(line)?);
        height += 1;
    }
    let image = Image {
        pixels,
        width: width.context("empty input image")?,
        height,
        background: false,
    };
    Ok((lut, image))
}

impl Image {
    fn get(&self, x: isize, y: isize) -> bool {
        if (0..self.width as isize).contains(&x) && (0..self.height as isize).contains(&y) {
            self.pixels[y as usize * self.width + x as usize]
        } else {
            self.background
        }
    }

    /// Grows the window by one pixel on every side.
    fn enhance(&self, lut: &[bool; 512]) -> Self {
        let (width, height) = (self.width + 2, self.height + 2);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height as isize {
            for x in 0..width as isize {
                let mut index = 0;
                for dy in -2..=0 {
                    for dx in -2..=0 {
                        index = index << 1 | usize::from(self.get(x + dx, y + dy));
                    }
                }
                pixels.push(lut[index]);
            }
        }
        let background = lut[if self.background { 511 } else { 0 }];
        Self {
            pixels,
            width,
            height,
            background,
        }
    }

    fn lit(&self) -> Result<usize> {
        ensure!(!self.background, "infinitely many pixels are lit");
        Ok(self.pixels.iter().filter(|&&p| p).count())
    }
}

pub fn day20(input: &str) -> Result<(usize, usize)> {
    let (lut, mut image) = parse(input)?;
    let mut part1 = 0;
    for step in 1..=50 {
        image = image.enhance(&lut);
        if step == 2 {
            part1 = image.lit()?;
        }
    }
    Ok((part1, image.lit()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_input;

    use indoc::indoc;

    const DIAGONAL: &str = indoc! {"
        #..
        .#.
        ..#
    "};

    fn algorithm(rule: impl Fn(usize) -> bool) -> String {
        (0..512).map(|i| if rule(i) { '#' } else { '.' }).collect()
    }

    #[test]
    fn test_identity() -> Result<()> {
        let input = format!("{}\n\n{}", algorithm(|i| i & 16 != 0), DIAGONAL);
        let (lut, image) = parse(&input)?;
        let enhanced = image.enhance(&lut);
        assert_eq!((enhanced.width, enhanced.height), (5, 5));
        assert!(enhanced.get(1, 1) && enhanced.get(2, 2) && enhanced.get(3, 3));
        assert_eq!(day20(&input)?, (3, 3));
        Ok(())
    }

    #[test]
    fn test_flipping_background() -> Result<()> {
        let input = format!("{}\n\n{}", algorithm(|i| i & 16 == 0), DIAGONAL);
        let (lut, image) = parse(&input)?;
        let once = image.enhance(&lut);
        assert!(once.background);
        assert!(once.lit().is_err());
        let twice = once.enhance(&lut);
        assert!(!twice.background);
        assert_eq!(twice.lit()?, 3);
        assert_eq!(day20(&input)?, (3, 3));
        Ok(())
    }

    #[test]
    fn test_dilation() -> Result<()> {
        let input = format!("{}\n\n#\n", algorithm(|i| i != 0));
        let (lut, image) = parse(&input)?;
        assert_eq!(image.enhance(&lut).lit()?, 9);
        assert_eq!(day20(&input)?, (25, 101 * 101));
        Ok(())
    }

    #[test]
    fn test_day20() -> Result<()> {
        let example = include_str!("../../inputs/examples/day20.txt");
        let (lut, image) = parse(example)?;
        assert!(!lut[0]);
        assert_eq!(image.enhance(&lut).lit()?, 24);
        assert_eq!(day20(example)?, (35, 3351));
        Ok(())
    }

    #[test]
    fn test_invalid_algorithm() {
        assert!(day20("#.#\n\n#\n").is_err());
    }

    #[test]
    #[ignore = "needs inputs/20.txt"]
    fn test_day20_input() -> Result<()> {
        assert_eq!(day20(&default_input(20)?)?, (5571, 17965));
        Ok(())
    }
}
