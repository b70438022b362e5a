use std::path::Path;
use std::str::FromStr;

pub fn path(rawpath: &str) -> Result<(), String> {
    if Path::new(&rawpath).exists() {
        Ok(())
    } else {
        Err(format!("{} doesn't exist or there is no permission to read it", rawpath))
    }
}

pub fn writable(_rawpath: &str) -> Result<(), String> {
    // TODO: check that the parent directory is actually writable
    Ok(())
}

pub fn numeric<T>(low: T, upper: T) -> impl Fn(&str) -> Result<(), String>
where
    T: FromStr + std::fmt::Display + PartialOrd + Sized,
{
    move |val: &str| -> Result<(), String> {
        let parsed = match val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => return Err(format!("failed to parse {}", val)),
        };
        if parsed < low || parsed > upper {
            return Err(format!("Value {} is expected to be inside [{}, {}] range", val, low, upper));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn numeric() {
        let validator = super::numeric(0u8, 254u8);
        assert!(validator("0").is_ok());
        assert!(validator("254").is_ok());
        assert!(validator("255").is_err());
        assert!(validator("-1").is_err());
        assert!(validator("12a").is_err());

        let validator = super::numeric(1usize, 1usize);
        assert!(validator("1").is_ok());
        assert!(validator("2").is_err());
    }

    #[test]
    fn path() {
        assert!(super::path("/").is_ok());
        assert!(super::path("/definitely/missing/file.bam").is_err());
    }
}
