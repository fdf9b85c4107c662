use crate::imports::*;

/// Evenly spaced values over a closed interval.
pub trait Linspace {
    /// `n_elements` values from `start` to `stop`, both included.
    /// `n_elements` must be at least 2.
    fn linspace(start: f64, stop: f64, n_elements: usize) -> Vec<f64> {
        let n_steps = n_elements - 1;
        let step_size = (stop - start) / n_steps as f64;
        (0..=n_steps)
            .map(|x| x as f64 * step_size + start)
            .collect()
    }
}

impl Linspace for Vec<f64> {}

/// Hook executed after deserialization, e.g. to validate or derive fields.
pub trait Init {
    fn init(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Serialization formats understood by [SerdeAPI].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerdeFormat {
    Yaml,
    Json,
    Bincode,
}

impl SerdeFormat {
    /// Parses a file extension or format name, with or without leading `.`.
    pub fn parse(format: &str) -> anyhow::Result<Self> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "bin" => Ok(Self::Bincode),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                ["yaml", "yml", "json", "bin"]
            ),
        }
    }

    fn from_path(filepath: &Path) -> anyhow::Result<Self> {
        let extension = filepath
            .extension()
            .and_then(OsStr::to_str)
            .with_context(|| format!("File extension could not be parsed: {filepath:?}"))?;
        Self::parse(extension)
    }

    fn is_text(&self) -> bool {
        !matches!(self, Self::Bincode)
    }
}

/// File and string (de)serialization shared by specifications, configs and reports.
pub trait SerdeAPI: Serialize + for<'a> Deserialize<'a> + Init {
    /// Write (serialize) an object to a file whose extension selects the format
    /// (`yaml`/`yml`, `json` or `bin`).
    /// Creates the file if it does not exist, otherwise truncates it.
    fn to_file<P: AsRef<Path>>(&self, filepath: P) -> anyhow::Result<()> {
        let filepath = filepath.as_ref();
        let file = File::create(filepath)
            .with_context(|| format!("Could not create file: {filepath:?}"))?;
        match SerdeFormat::from_path(filepath)? {
            SerdeFormat::Yaml => serde_yaml::to_writer(&file, self)?,
            SerdeFormat::Json => serde_json::to_writer_pretty(&file, self)?,
            SerdeFormat::Bincode => bincode::serialize_into(&file, self)?,
        }
        Ok(())
    }

    /// Read (deserialize) an object from a file whose extension selects the format.
    ///
    /// # Arguments:
    ///
    /// * `filepath`: The filepath from which to read the object
    /// * `skip_init`: if true, [Init::init] is not run on the result
    fn from_file<P: AsRef<Path>>(filepath: P, skip_init: bool) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let format = SerdeFormat::from_path(filepath)?;
        let mut file = File::open(filepath).with_context(|| {
            if !filepath.exists() {
                format!("File not found: {filepath:?}")
            } else {
                format!("Could not open file: {filepath:?}")
            }
        })?;
        Self::from_reader(&mut file, format, skip_init)
            .with_context(|| format!("Could not load {filepath:?}"))
    }

    /// Deserialize an object from anything that implements [`std::io::Read`]
    fn from_reader<R: std::io::Read>(
        rdr: &mut R,
        format: SerdeFormat,
        skip_init: bool,
    ) -> anyhow::Result<Self> {
        let mut deserialized: Self = match format {
            SerdeFormat::Yaml => serde_yaml::from_reader(rdr)?,
            SerdeFormat::Json => serde_json::from_reader(rdr)?,
            SerdeFormat::Bincode => bincode::deserialize_from(rdr)?,
        };
        if !skip_init {
            deserialized.init()?;
        }
        Ok(deserialized)
    }

    /// Write (serialize) an object into a string in a text format (`yaml` or `json`)
    fn to_str(&self, format: &str) -> anyhow::Result<String> {
        match SerdeFormat::parse(format)? {
            SerdeFormat::Yaml => self.to_yaml(),
            SerdeFormat::Json => self.to_json(),
            SerdeFormat::Bincode => bail!("`bin` is not a string format"),
        }
    }

    /// Read (deserialize) an object from a string in a text format (`yaml` or `json`)
    fn from_str<S: AsRef<str>>(contents: S, format: &str, skip_init: bool) -> anyhow::Result<Self> {
        let format = SerdeFormat::parse(format)?;
        ensure!(format.is_text(), "`bin` is not a string format");
        Self::from_reader(&mut contents.as_ref().as_bytes(), format, skip_init)
    }

    fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(&self)?)
    }

    fn from_json<S: AsRef<str>>(json_str: S, skip_init: bool) -> anyhow::Result<Self> {
        Self::from_str(json_str, "json", skip_init)
    }

    fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }

    fn from_yaml<S: AsRef<str>>(yaml_str: S, skip_init: bool) -> anyhow::Result<Self> {
        Self::from_str(yaml_str, "yaml", skip_init)
    }

    fn to_bincode(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }

    /// Read (deserialize) an object from bincode-encoded bytes; always runs [Init::init]
    fn from_bincode(encoded: &[u8]) -> anyhow::Result<Self> {
        let mut bincode_de: Self = bincode::deserialize(encoded)?;
        bincode_de.init()?;
        Ok(bincode_de)
    }
}

impl<T: Init> Init for Vec<T> {
    fn init(&mut self) -> Result<(), Error> {
        for val in self {
            val.init()?
        }
        Ok(())
    }
}

impl<T: SerdeAPI> SerdeAPI for Vec<T> {}
