use glam::Mat4;

/// Byte size of a `mat4x4<f32>` uniform.
pub const MAT4_SIZE: usize = std::mem::size_of::<[f32; 16]>();

/// Resolved location of a named `mat4x4<f32>` inside the uniform block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation {
    offset: u32,
}

impl UniformLocation {
    #[inline]
    pub const fn new(offset: u32) -> Self {
        Self { offset }
    }

    /// Byte offset inside the block.
    #[inline]
    pub fn offset(self) -> u32 {
        self.offset
    }
}

/// Names and offsets of the matrices declared in the shader's uniform block.
///
/// Built by reflecting the `var<uniform>` bound at `@group(0) @binding(0)`.
/// Only `mat4x4<f32>` members are addressable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformLayout {
    size: u32,
    members: Vec<(String, UniformLocation)>,
}

impl UniformLayout {
    /// Layout with no addressable members.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reflects the uniform block at `@group(0) @binding(0)`.
    ///
    /// Returns `Ok(empty)` when the shader declares no such block. Fails when
    /// the block is not a struct, or when the shader binds any other resource,
    /// since nothing else is ever supplied to the pipeline.
    pub fn reflect(module: &naga::Module) -> Result<Self, String> {
        let mut block = None;
        for (_, var) in module.global_variables.iter() {
            let Some(binding) = var.binding.as_ref() else { continue };
            let at_origin = binding.group == 0 && binding.binding == 0;
            if !(at_origin && var.space == naga::AddressSpace::Uniform) {
                return Err(format!(
                    "`{}` at @group({}) @binding({}) is not supported; \
                     only a uniform block at @group(0) @binding(0) is bound",
                    var.name.as_deref().unwrap_or("<unnamed>"),
                    binding.group,
                    binding.binding
                ));
            }
            block = Some(var);
        }

        let Some(block) = block else {
            return Ok(Self::empty());
        };

        let naga::TypeInner::Struct { members, span } = &module.types[block.ty].inner else {
            return Err(format!(
                "uniform `{}` at @group(0) @binding(0) must be a struct",
                block.name.as_deref().unwrap_or("<unnamed>")
            ));
        };

        let members = members
            .iter()
            .filter(|m| is_mat4_f32(&module.types[m.ty].inner))
            .filter_map(|m| Some((m.name.clone()?, UniformLocation::new(m.offset))))
            .collect();

        Ok(Self { size: *span, members })
    }

    /// Builds a layout by hand. Members are `(name, byte offset)` pairs.
    pub fn from_members<I, S>(size: u32, members: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let members = members
            .into_iter()
            .map(|(name, offset)| (name.into(), UniformLocation::new(offset)))
            .collect();
        Self { size, members }
    }

    /// Size in bytes of the uniform block (0 when the shader has none).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Looks up a matrix uniform by name.
    pub fn location(&self, name: &str) -> Option<UniformLocation> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, loc)| *loc)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(n, _)| n.as_str())
    }
}

fn is_mat4_f32(inner: &naga::TypeInner) -> bool {
    matches!(
        inner,
        naga::TypeInner::Matrix {
            columns: naga::VectorSize::Quad,
            rows: naga::VectorSize::Quad,
            scalar,
        } if *scalar == naga::Scalar::F32
    )
}

/// CPU-side staging copy of a uniform block.
///
/// Matrices are stored column-major, matching WGSL `mat4x4<f32>` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    bytes: Vec<u8>,
}

impl UniformBlock {
    pub fn new(size: u32) -> Self {
        Self { bytes: vec![0; size as usize] }
    }

    /// Writes `value` at `location`. Out-of-range locations are ignored.
    pub fn write_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        let start = location.offset() as usize;
        let end = start + MAT4_SIZE;
        debug_assert!(
            end <= self.bytes.len(),
            "uniform offset {start} outside block of {} bytes",
            self.bytes.len()
        );
        let Some(dst) = self.bytes.get_mut(start..end) else {
            return;
        };
        dst.copy_from_slice(bytemuck::bytes_of(&value.to_cols_array()));
    }

    /// Reads the matrix stored at `location`.
    pub fn read_mat4(&self, location: UniformLocation) -> Option<Mat4> {
        let start = location.offset() as usize;
        let src = self.bytes.get(start..start + MAT4_SIZE)?;
        let cols: [f32; 16] = bytemuck::pod_read_unaligned(src);
        Some(Mat4::from_cols_array(&cols))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
