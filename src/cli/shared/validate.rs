use std::path::Path;
use std::str::FromStr;

pub fn path(rawpath: &str) -> Result<(), String> {
    let path = Path::new(&rawpath);
    if !path.exists() {
        Err(format!("{} doesn't exist or there is no permission to read it", rawpath))
    } else {
        Ok(())
    }
}

pub fn writable(_rawpath: &str) -> Result<(), String> {
    // TODO: are there any good way to actually check that file is writeable?
    Ok(())
}

pub fn chain(value: &str) -> Result<(), String> {
    if value.chars().count() == 1 {
        Ok(())
    } else {
        Err(format!("chain must be a single character, got {:?}", value))
    }
}

pub fn numeric<T>(low: T, upper: T) -> impl Fn(&str) -> Result<(), String>
where
    T: FromStr + std::fmt::Display + std::cmp::PartialOrd + Sized,
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    move |val: &str| -> Result<(), String> {
        let number = match val.parse::<T>() {
            Ok(x) => x,
            Err(_) => return Err(format!("failed to parse {}", val)),
        };
        if number < low || number > upper {
            return Err(format!("Value {} is expected to be inside [{}, {}] range", val, low, upper));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn chain() {
        assert!(super::chain("A").is_ok());
        assert!(super::chain("h").is_ok());
        for bad in ["", "AB", "A "] {
            assert!(super::chain(bad).is_err());
        }
    }

    #[test]
    fn numeric() {
        let validator = super::numeric(10, 12);
        assert!(validator("9").is_err());
        assert!(validator("10").is_ok());
        assert!(validator("12").is_ok());
        assert!(validator("13").is_err());

        let validator = super::numeric(0f64, 1f64);
        assert!(validator("0.001").is_ok());
        assert!(validator("1.5").is_err());
        assert!(validator("lots").is_err());
    }
}
