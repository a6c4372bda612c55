//! Fixed PostScript prologue fragments.

use crate::types::{ISO_FONTS, ISO_SUFFIX};

/// Name of the Latin-1 encoding vector.
pub const ISO_LATIN1_ENCODING: &str = "ISOLatin1Encoding";

/// Language level probe emitted at the top of every prologue.
pub const LANGUAGE_LEVEL: &str = "/ll 1 def systemdict /languagelevel known {\n/ll languagelevel def } if";

/// Small drawing helpers available to every page.
pub const BASIC_PROCS: &str = r#"/box {
  newpath 3 copy pop exch 4 copy pop pop
  8 copy pop pop pop pop exch pop exch
  3 copy pop pop exch moveto lineto
  lineto lineto pop pop pop pop closepath
} bind def

/circle {newpath 0 360 arc closepath} bind def"#;

/// Difference-encoding helpers and the Latin-1 vector (code points 144 and up).
pub const LATIN1_ENCODING: &str = r#"/STARTDIFFENC { mark } bind def
/ENDDIFFENC {
    counttomark 2 add -1 roll 256 array copy
    /TempEncode exch def
    /EncodePointer 0 def
    {
        counttomark -1 roll
        dup type dup /marktype eq {
            pop pop exit
        } {
            /nametype eq {
                TempEncode EncodePointer 3 -1 roll put
                /EncodePointer EncodePointer 1 add def
            } {
                /EncodePointer exch def
            } ifelse
        } ifelse
    } loop
    TempEncode def
} bind def

/ISOLatin1Encoding where {
    pop
} {
    /ISOLatin1Encoding StandardEncoding STARTDIFFENC
        144 /dotlessi /grave /acute /circumflex /tilde
        /macron /breve /dotaccent /dieresis /.notdef /ring
        /cedilla /.notdef /hungarumlaut /ogonek /caron /space
        /exclamdown /cent /sterling /currency /yen /brokenbar
        /section /dieresis /copyright /ordfeminine
        /guillemotleft /logicalnot /hyphen /registered
        /macron /degree /plusminus /twosuperior
        /threesuperior /acute /mu /paragraph /periodcentered
        /cedilla /onesuperior /ordmasculine /guillemotright
        /onequarter /onehalf /threequarters /questiondown
        /Agrave /Aacute /Acircumflex /Atilde /Adieresis
        /Aring /AE /Ccedilla /Egrave /Eacute /Ecircumflex
        /Edieresis /Igrave /Iacute /Icircumflex /Idieresis
        /Eth /Ntilde /Ograve /Oacute /Ocircumflex /Otilde
        /Odieresis /multiply /Oslash /Ugrave /Uacute
        /Ucircumflex /Udieresis /Yacute /Thorn /germandbls
        /agrave /aacute /acircumflex /atilde /adieresis
        /aring /ae /ccedilla /egrave /eacute /ecircumflex
        /edieresis /igrave /iacute /icircumflex /idieresis
        /eth /ntilde /ograve /oacute /ocircumflex /otilde
        /odieresis /divide /oslash /ugrave /uacute
        /ucircumflex /udieresis /yacute /thorn /ydieresis
    ENDDIFFENC
} ifelse

/REENCODEFONT { % /Newfont NewEncoding /Oldfont
    findfont dup length 4 add dict
    begin
        { % forall
            1 index /FID ne
            2 index /UniqueID ne and
            2 index /XUID ne and
            { def } { pop pop } ifelse
        } forall
        /Encoding exch def
        /BitmapWidths false def
        /ExactSize 0 def
        /InBetweenSize 0 def
        /TransformedChar 0 def
        currentdict
    end
    definefont pop
} bind def"#;

/// One `-iso` face definition per standard face.
pub fn reencoded_faces() -> impl Iterator<Item = String> {
    ISO_FONTS.iter().map(|face| {
        format!("/{face}{ISO_SUFFIX} {ISO_LATIN1_ENCODING} /{face} REENCODEFONT")
    })
}
